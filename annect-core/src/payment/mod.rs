//! Snap-style payment gateway client.
//!
//! The gateway owns the actual payment flow: this client only creates a
//! transaction and hands the resulting token/redirect URL back to the
//! browser, which drives the popup flow. Confirmation comes back through
//! the client-driven confirm-payment call, not from this module.

use crate::config::GatewayConfig;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Errors from the gateway handoff.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("gateway rejected the transaction with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("invalid gateway base url")]
    InvalidUrl,
}

/// Customer identity forwarded to the gateway.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub email: String,
}

#[derive(Debug, Clone, serde::Serialize)]
struct TransactionDetails {
    order_id: String,
    gross_amount: Decimal,
}

#[derive(Debug, Clone, serde::Serialize)]
struct CreateTransactionBody {
    transaction_details: TransactionDetails,
    customer_details: CustomerDetails,
}

/// Token pair returned by the gateway, forwarded verbatim to the client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GatewayToken {
    pub token: String,
    pub redirect_url: String,
}

/// HTTP client for the Snap transaction API.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// `createTransaction(order_id, amount, customer) -> {token, redirect_url}`.
    ///
    /// Attempted exactly once per invocation; any failure surfaces to the
    /// caller without retry.
    pub async fn create_transaction(
        &self,
        config: &GatewayConfig,
        order_id: String,
        gross_amount: Decimal,
        customer: CustomerDetails,
    ) -> Result<GatewayToken, GatewayError> {
        let url = config
            .base_url
            .join("snap/v1/transactions")
            .map_err(|_| GatewayError::InvalidUrl)?;

        debug!(%order_id, %gross_amount, "Creating gateway transaction");

        let response = self
            .http
            .post(url)
            .basic_auth(&config.server_key, Some(""))
            .json(&CreateTransactionBody {
                transaction_details: TransactionDetails {
                    order_id,
                    gross_amount,
                },
                customer_details: customer,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GatewayToken>().await?)
    }
}

impl Default for GatewayClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate an order id for one payment attempt.
///
/// Unique per attempt (millisecond timestamp plus a random suffix) but not
/// persisted or reconciled against the gateway's ledger.
pub fn new_order_id() -> String {
    let millis = (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i128;
    let suffix: u64 = rand::random();
    format!("{millis}-{suffix:x}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_differ_between_attempts() {
        let a = new_order_id();
        let b = new_order_id();
        assert_ne!(a, b);
    }

    #[test]
    fn order_id_has_timestamp_and_suffix() {
        let id = new_order_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<i128>().is_ok());
        assert!(u64::from_str_radix(suffix, 16).is_ok());
    }
}
