//! Notification events bound to lifecycle transitions.
//!
//! Handlers emit a [`MailEvent`] after persisted state has been mutated;
//! the [`crate::processors::MailSender`] drains the channel and talks to
//! the mail provider. Delivery is fire-and-forget: a failed send is
//! logged and never rolls back or retries the triggering operation.

pub mod channels;
pub mod types;

pub use channels::{DEFAULT_CHANNEL_BUFFER, EventSenders, MailEventReceiver, MailEventSender, mail_event_channel};
pub use types::MailEvent;
