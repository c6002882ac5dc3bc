use std::io;

use tokio::net::TcpListener;

use crate::infra::config::ServerConfig;

/// Bind the configured host and port. The host may be a name
/// (`localhost`) or a bare IPv4/IPv6 literal (`0.0.0.0`, `::`).
pub async fn bind_listener(server: &ServerConfig) -> io::Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port)).await
}
