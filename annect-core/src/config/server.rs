//! HTTP server configuration.

use std::net::SocketAddr;

/// Listen address for the HTTP surface.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}
