//! TOML file configuration structures.
//!
//! These structs directly map to the `annect-config.toml` file format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub billing: BillingConfig,
    pub cron: CronConfig,
    pub gateway: GatewayConfig,
    pub mail: MailConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Listing-fee billing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Fee charged per day of event visibility.
    #[serde(default = "default_listing_fee_per_day")]
    pub listing_fee_per_day: Decimal,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            listing_fee_per_day: default_listing_fee_per_day(),
        }
    }
}

fn default_listing_fee_per_day() -> Decimal {
    Decimal::from(500)
}

/// Scheduled-trigger authentication section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronConfig {
    /// Shared secret the external scheduler presents as a bearer token.
    pub secret: String,
}

/// Payment gateway section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway API base URL (sandbox or production).
    pub base_url: Url,
    /// Server key used for basic auth against the gateway.
    pub server_key: String,
}

/// Mail provider section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mail provider send-API base URL.
    pub base_url: Url,
    /// Bearer token for the provider.
    pub api_key: String,
    /// From address for outgoing mail.
    pub sender: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[billing]
listing_fee_per_day = "750"

[cron]
secret = "sweep-secret"

[gateway]
base_url = "https://app.sandbox.midtrans.com/"
server_key = "SB-server-key"

[mail]
base_url = "https://api.mail.example/"
api_key = "mail-key"
sender = "no-reply@annect.example"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.billing.listing_fee_per_day, Decimal::from(750));
        assert_eq!(config.cron.secret, "sweep-secret");
        assert_eq!(config.mail.sender, "no-reply@annect.example");
    }

    #[test]
    fn test_optional_sections_default() {
        let toml_str = r#"
[cron]
secret = "sweep-secret"

[gateway]
base_url = "https://app.sandbox.midtrans.com/"
server_key = "SB-server-key"

[mail]
base_url = "https://api.mail.example/"
api_key = "mail-key"
sender = "no-reply@annect.example"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.billing.listing_fee_per_day, Decimal::from(500));
    }
}
