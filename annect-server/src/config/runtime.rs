//! Runtime configuration re-exports.
//!
//! The actual config types are defined in `annect-core::config`; this
//! module re-exports them for convenience.

pub use annect_core::config::{
    BillingConfig, CronConfig, GatewayConfig, MailConfig, ServerConfig, SharedConfig,
};
