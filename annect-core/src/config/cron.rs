//! Scheduled-trigger authentication.

/// Shared secret presented by the external scheduler that invokes the
/// expiry sweep.
#[derive(Debug, Clone)]
pub struct CronConfig {
    pub secret: String,
}
