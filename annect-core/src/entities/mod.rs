pub mod channel;
pub mod event;
pub mod favorite;
pub mod membership;
pub mod report;
pub mod taxonomy;
pub mod user;
pub mod withdraw;

/// Event lifecycle status.
///
/// Linear: `Pending -> Ongoing -> Done`. There are no backward transitions
/// and no cancellation state. Stored lowercase in Postgres, serialized
/// SCREAMING-CASE on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(rename_all = "lowercase", type_name = "event_status")]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Pending,
    Ongoing,
    Done,
}

/// Channel verification status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(rename_all = "lowercase", type_name = "channel_status")]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelStatus {
    Unverified,
    Verified,
}

/// Account role, set once at provisioning time.
///
/// Roles are an explicit attribute of the identity record; nothing in the
/// system infers a role from an email address.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(rename_all = "lowercase", type_name = "user_role")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}
