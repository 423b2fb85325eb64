use std::sync::Arc;

use mcp_asset_server::assets::registry::AssetRegistry;
use mcp_asset_server::config::{ServerConfig, Transport};
use mcp_asset_server::http;
use mcp_asset_server::server::StdioServer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr: in stdio mode stdout belongs to the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_asset_server=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mcp-asset-server: configuration error: {e}");
            std::process::exit(2);
        }
    };

    // Populate the registry fully before any transport accepts requests.
    let registry = Arc::new(AssetRegistry::new(config.repo_root.clone()));
    let init = Arc::clone(&registry);
    if let Err(e) = tokio::task::spawn_blocking(move || init.initialize()).await {
        eprintln!("mcp-asset-server: initialization failed: {e}");
        std::process::exit(1);
    }

    match config.transport {
        Transport::Stdio => {
            let mut server = StdioServer::new(registry);
            if let Err(e) = server.run().await {
                eprintln!("mcp-asset-server: fatal error: {e}");
                std::process::exit(1);
            }
        }
        Transport::Http { port } => {
            if let Err(e) = http::serve(registry, port).await {
                eprintln!("mcp-asset-server: fatal error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
