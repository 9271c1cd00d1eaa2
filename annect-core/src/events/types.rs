//! Mail event definitions.
//!
//! Events carry the data the template needs at send time. The one
//! exception is [`MailEvent::Broadcast`], which carries only the channel
//! id; the sender resolves the current follower list from the database
//! when it processes the event.

use rust_decimal::Decimal;
use uuid::Uuid;

/// A notification to be delivered by the mail dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailEvent {
    /// First sign-in of a regular account.
    Welcome { to: String, name: String },
    /// A user created their organizer channel.
    ChannelCreated { to: String, name: String },
    /// An admin verified the channel.
    ChannelVerified { to: String, name: String },
    /// An event was created; the listing fee is due.
    EventCreated {
        to: String,
        name: String,
        total_fee: Decimal,
    },
    /// A new event was published under a channel; goes to every follower.
    Broadcast { channel_id: Uuid },
    /// A paid join is awaiting payment.
    JoinPending {
        to: String,
        name: String,
        price: Decimal,
    },
    /// Payment confirmed; includes the private group-join link.
    PaymentDone {
        to: String,
        name: String,
        link_group: String,
    },
}

impl MailEvent {
    /// The provider-side template this event renders with.
    pub fn template_id(&self) -> &'static str {
        match self {
            MailEvent::Welcome { .. } => "welcome",
            MailEvent::ChannelCreated { .. } => "channel-created",
            MailEvent::ChannelVerified { .. } => "channel-verified",
            MailEvent::EventCreated { .. } => "event-created",
            MailEvent::Broadcast { .. } => "broadcast",
            MailEvent::JoinPending { .. } => "join-pending",
            MailEvent::PaymentDone { .. } => "payment-done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ids_are_stable() {
        let cases = [
            (
                MailEvent::Welcome {
                    to: "a@b".into(),
                    name: "A".into(),
                },
                "welcome",
            ),
            (
                MailEvent::ChannelVerified {
                    to: "a@b".into(),
                    name: "A".into(),
                },
                "channel-verified",
            ),
            (
                MailEvent::PaymentDone {
                    to: "a@b".into(),
                    name: "A".into(),
                    link_group: "https://chat.example/g".into(),
                },
                "payment-done",
            ),
            (
                MailEvent::Broadcast {
                    channel_id: Uuid::nil(),
                },
                "broadcast",
            ),
        ];
        for (event, expected) in cases {
            assert_eq!(event.template_id(), expected);
        }
    }
}
