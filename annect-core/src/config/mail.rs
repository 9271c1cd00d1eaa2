//! Transactional mail provider configuration.

use url::Url;

/// Mail delivery provider endpoint and credentials.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Base URL of the provider's send API.
    pub base_url: Url,
    /// Bearer token for the provider.
    pub api_key: String,
    /// From address for all outgoing mail.
    pub sender: String,
}
