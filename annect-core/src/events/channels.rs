//! Mail event channel factory and handles.

use super::types::MailEvent;
use tokio::sync::mpsc;

/// Buffer size for the mail event channel. Large enough to absorb a
/// follower broadcast burst without blocking request handlers.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

pub type MailEventSender = mpsc::Sender<MailEvent>;
pub type MailEventReceiver = mpsc::Receiver<MailEvent>;

/// Create the mail event channel. The sender side is cloned into request
/// handlers; the single receiver is owned by the `MailSender` processor.
pub fn mail_event_channel() -> (MailEventSender, MailEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Container for the event senders handlers need.
#[derive(Clone)]
pub struct EventSenders {
    pub mail: MailEventSender,
}

impl EventSenders {
    pub fn new(mail: MailEventSender) -> Self {
        Self { mail }
    }

    /// Enqueue a mail event.
    ///
    /// Fire-and-forget end to end: by the time a handler emits, its state
    /// change has already committed, so a closed or full queue is logged
    /// and dropped instead of failing the operation.
    pub async fn enqueue_mail(&self, event: MailEvent) {
        let template = event.template_id();
        if self.mail.send(event).await.is_err() {
            tracing::warn!(template, "Mail queue closed; notification dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_on_closed_queue_is_not_an_error() {
        let (tx, rx) = mail_event_channel();
        drop(rx);

        // Must complete without surfacing the send failure.
        EventSenders::new(tx)
            .enqueue_mail(MailEvent::Welcome {
                to: "a@b".into(),
                name: "A".into(),
            })
            .await;
    }
}
