//! Validated runtime configuration shared across crates.
//!
//! Loading and parsing happen in the server crate; these are the typed
//! sections the rest of the system consumes. Every collaborator endpoint
//! and secret lives here — nothing reads ambient globals at call sites.

mod billing;
mod cron;
mod gateway;
mod mail;
mod server;

pub use billing::BillingConfig;
pub use cron::CronConfig;
pub use gateway::GatewayConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration with separate locks per section, so a SIGHUP
/// reload of one section never blocks readers of another.
#[derive(Clone)]
pub struct SharedConfig {
    pub server: Arc<RwLock<ServerConfig>>,
    pub billing: Arc<RwLock<BillingConfig>>,
    pub cron: Arc<RwLock<CronConfig>>,
    pub gateway: Arc<RwLock<GatewayConfig>>,
    pub mail: Arc<RwLock<MailConfig>>,
}
