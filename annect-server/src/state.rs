//! Application state shared across all request handlers.

use annect_core::config::SharedConfig;
use annect_core::events::{EventSenders, MailEventSender};
use annect_core::payment::GatewayClient;
use sqlx::PgPool;

/// Application state that is shared across all request handlers.
///
/// Cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Runtime configuration (reloadable via SIGHUP).
    pub config: SharedConfig,
    /// Senders for background event channels (mail dispatch).
    pub event_senders: EventSenders,
    /// Payment gateway client.
    pub gateway: GatewayClient,
}

impl AppState {
    pub fn new(db: PgPool, config: SharedConfig, mail_tx: MailEventSender) -> Self {
        Self {
            db,
            config,
            event_senders: EventSenders::new(mail_tx),
            gateway: GatewayClient::new(),
        }
    }
}
