//! Background processors.
//!
//! - `MailSender`: receives `MailEvent`, renders the template payload, and
//!   delivers it to the transactional mail provider.

pub mod mail_sender;

pub use mail_sender::MailSender;
