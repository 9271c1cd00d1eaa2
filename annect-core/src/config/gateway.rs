//! Payment gateway collaborator configuration.

use url::Url;

/// Snap-style payment gateway endpoint and credentials.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway API (sandbox or production).
    pub base_url: Url,
    /// Server key used as HTTP basic-auth username.
    pub server_key: String,
}
