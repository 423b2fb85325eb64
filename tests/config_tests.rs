use std::path::Path;

use mcp_asset_server::config::{ServerConfig, Transport};

fn parse(args: &[&str]) -> Result<ServerConfig, String> {
    ServerConfig::from_args(args.iter().map(|s| s.to_string()))
}

#[test]
fn defaults_to_stdio_in_current_directory() {
    let config = parse(&[]).unwrap();
    assert_eq!(config.transport, Transport::Stdio);
    assert_eq!(config.repo_root, std::env::current_dir().unwrap());
}

#[test]
fn http_mode_with_port_and_root() {
    let config = parse(&["--http", "--port", "8081", "--root", "/srv/repo"]).unwrap();
    assert_eq!(config.transport, Transport::Http { port: 8081 });
    assert_eq!(config.repo_root, Path::new("/srv/repo"));
}

#[test]
fn http_mode_uses_default_port() {
    let config = parse(&["--http"]).unwrap();
    assert_eq!(config.transport, Transport::Http { port: 3000 });
}

#[test]
fn port_is_validated() {
    assert!(parse(&["--http", "--port", "0"]).is_err());
    assert!(parse(&["--http", "--port", "65536"]).is_err());
    assert!(parse(&["--http", "--port", "web"]).is_err());
    assert!(parse(&["--http", "--port"]).is_err());
}

#[test]
fn port_without_http_is_tolerated() {
    // Warned about and ignored, not a usage error.
    let config = parse(&["--port", "9000"]).unwrap();
    assert_eq!(config.transport, Transport::Stdio);
}

#[test]
fn unknown_arguments_are_rejected() {
    assert!(parse(&["--watch"]).is_err());
}
