//! MailSender processor.
//!
//! The MailSender is responsible for:
//! - Receiving `MailEvent` from the queue
//! - Resolving broadcast recipients (channel followers) from the database
//! - Rendering the template payload for each event variant
//! - POSTing to the mail provider's send API
//!
//! Delivery is fire-and-forget. A failed send is logged and dropped; it is
//! never retried and never affects the lifecycle operation that emitted
//! the event, which has already committed its state change.

use crate::config::MailConfig;
use crate::entities::favorite::Follow;
use crate::events::{MailEvent, MailEventReceiver};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{RwLock, watch};
use tracing::{debug, error, info, warn};

/// Errors that can occur during mail delivery.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("mail provider rejected the send with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid mail provider base url")]
    InvalidUrl,

    #[error("broadcast channel not found: {0}")]
    ChannelNotFound(uuid::Uuid),
}

/// One rendered send: a template, a recipient, and the template data.
#[derive(Debug, Clone, serde::Serialize)]
struct SendRequest<'a> {
    template_id: &'static str,
    from: &'a str,
    to: &'a str,
    data: serde_json::Value,
}

/// MailSender drains the mail event queue and talks to the provider.
pub struct MailSender {
    pool: PgPool,
    mail_rx: MailEventReceiver,
    shutdown_rx: watch::Receiver<bool>,
    config: Arc<RwLock<MailConfig>>,
    http_client: reqwest::Client,
}

impl MailSender {
    pub fn new(
        pool: PgPool,
        mail_rx: MailEventReceiver,
        shutdown_rx: watch::Receiver<bool>,
        config: Arc<RwLock<MailConfig>>,
    ) -> Self {
        Self {
            pool,
            mail_rx,
            shutdown_rx,
            config,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Run the MailSender until shutdown or channel closure.
    pub async fn run(mut self) {
        info!("MailSender started");

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("MailSender received shutdown signal");
                        break;
                    }
                }

                Some(event) = self.mail_rx.recv() => {
                    debug!(template = event.template_id(), "Received MailEvent");

                    if let Err(e) = self.process_event(event).await {
                        // Non-fatal per design: log and move on.
                        error!(error = %e, "Failed to deliver mail");
                    }
                }

                else => {
                    info!("MailEvent channel closed");
                    break;
                }
            }
        }

        info!("MailSender shutdown complete");
    }

    async fn process_event(&self, event: MailEvent) -> Result<(), MailError> {
        match event {
            MailEvent::Broadcast { channel_id } => self.send_broadcast(channel_id).await,
            other => {
                let (to, data) = render(&other);
                self.send_one(other.template_id(), &to, data).await
            }
        }
    }

    /// Deliver the new-event broadcast to every follower of the channel.
    ///
    /// Recipients are resolved at send time, not at emit time, so a
    /// follower gained between the two sees the mail and one lost does not.
    async fn send_broadcast(&self, channel_id: uuid::Uuid) -> Result<(), MailError> {
        let channel_name: Option<(String,)> =
            sqlx::query_as("SELECT name FROM channels WHERE id = $1")
                .bind(channel_id)
                .fetch_optional(&self.pool)
                .await?;
        let Some((channel_name,)) = channel_name else {
            return Err(MailError::ChannelNotFound(channel_id));
        };

        let followers = Follow::follower_emails(&self.pool, channel_id).await?;
        debug!(
            %channel_id,
            followers = followers.len(),
            "Broadcasting new event to followers"
        );

        for (email, name) in followers {
            let data = serde_json::json!({
                "name": name,
                "channel_name": channel_name,
            });
            if let Err(e) = self.send_one("broadcast", &email, data).await {
                // One bad recipient must not starve the rest.
                warn!(error = %e, "Broadcast recipient failed");
            }
        }

        Ok(())
    }

    async fn send_one(
        &self,
        template_id: &'static str,
        to: &str,
        data: serde_json::Value,
    ) -> Result<(), MailError> {
        let config = self.config.read().await;
        let url = config
            .base_url
            .join("send")
            .map_err(|_| MailError::InvalidUrl)?;
        let api_key = config.api_key.clone();
        let sender = config.sender.clone();
        drop(config);

        let response = self
            .http_client
            .post(url)
            .bearer_auth(api_key)
            .json(&SendRequest {
                template_id,
                from: &sender,
                to,
                data,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(template = template_id, "Mail delivered");
        Ok(())
    }
}

/// Recipient and template data for the single-recipient variants.
fn render(event: &MailEvent) -> (String, serde_json::Value) {
    match event {
        MailEvent::Welcome { to, name } => (to.clone(), serde_json::json!({ "name": name })),
        MailEvent::ChannelCreated { to, name } => (to.clone(), serde_json::json!({ "name": name })),
        MailEvent::ChannelVerified { to, name } => {
            (to.clone(), serde_json::json!({ "name": name }))
        }
        MailEvent::EventCreated {
            to,
            name,
            total_fee,
        } => (
            to.clone(),
            serde_json::json!({ "name": name, "total_fee": total_fee.to_string() }),
        ),
        MailEvent::JoinPending { to, name, price } => (
            to.clone(),
            serde_json::json!({ "name": name, "price": price.to_string() }),
        ),
        MailEvent::PaymentDone {
            to,
            name,
            link_group,
        } => (
            to.clone(),
            serde_json::json!({ "name": name, "link_group": link_group }),
        ),
        // Broadcast is handled separately; render is never called with it.
        MailEvent::Broadcast { channel_id } => (
            String::new(),
            serde_json::json!({ "channel_id": channel_id }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn payment_done_payload_carries_group_link() {
        let (to, data) = render(&MailEvent::PaymentDone {
            to: "member@example.com".into(),
            name: "Member".into(),
            link_group: "https://chat.example/group".into(),
        });
        assert_eq!(to, "member@example.com");
        assert_eq!(data["link_group"], "https://chat.example/group");
    }

    #[test]
    fn event_created_payload_carries_fee() {
        let (_, data) = render(&MailEvent::EventCreated {
            to: "org@example.com".into(),
            name: "Org".into(),
            total_fee: Decimal::from(15_000),
        });
        assert_eq!(data["total_fee"], "15000");
    }
}
