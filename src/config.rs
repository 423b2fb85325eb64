use std::path::PathBuf;

/// Default port for the network transport.
const DEFAULT_PORT: u16 = 3000;

/// Transport binding selected at startup. Modes are mutually exclusive for a
/// given process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// HTTP listener with SSE stream and message endpoint.
    Http { port: u16 },
}

/// Server configuration assembled from process arguments.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub repo_root: PathBuf,
    pub transport: Transport,
}

impl ServerConfig {
    /// Parse startup parameters.
    ///
    /// - `--http` — serve over HTTP/SSE instead of stdio
    /// - `--port <n>` — listen port for `--http`, 1–65535 (default 3000);
    ///   without `--http` the flag is warned about and ignored
    /// - `--root <path>` — repository root (default: current directory)
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut http = false;
        let mut port: Option<u16> = None;
        let mut root: Option<PathBuf> = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--http" => http = true,
                "--port" => {
                    let val = args.next().ok_or("--port requires a value")?;
                    let parsed = val
                        .parse::<u16>()
                        .ok()
                        .filter(|p| *p != 0)
                        .ok_or("--port must be an integer between 1 and 65535")?;
                    port = Some(parsed);
                }
                "--root" => {
                    let val = args.next().ok_or("--root requires a value")?;
                    root = Some(PathBuf::from(val));
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }

        let repo_root = match root {
            Some(r) => r,
            None => std::env::current_dir()
                .map_err(|e| format!("cannot determine current directory: {e}"))?,
        };

        let transport = if http {
            Transport::Http {
                port: port.unwrap_or(DEFAULT_PORT),
            }
        } else {
            // Tolerated, not a usage error: the flag simply has no effect.
            if port.is_some() {
                tracing::warn!("--port has no effect without --http, ignoring");
            }
            Transport::Stdio
        };

        Ok(Self {
            repo_root,
            transport,
        })
    }
}
