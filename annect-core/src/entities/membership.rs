//! Membership rows: a user's record of joining an event.
//!
//! `status` is the payment flag: `false` means awaiting payment, `true`
//! means confirmed. Free joins are confirmed on insert. The unique
//! `(user_id, event_id)` constraint plus insert-on-conflict makes joining
//! idempotent even under concurrent calls; the check-then-create race of a
//! naive implementation cannot produce duplicate rows.

use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Uuid,
    /// Payment flag: false = awaiting payment, true = confirmed.
    pub status: bool,
    /// Optional transfer-proof image reference.
    pub tf_image: Option<String>,
    pub created_at: time::PrimitiveDateTime,
}

impl Membership {
    /// Join an event. `confirmed` is true for free events, which skip the
    /// payment leg entirely.
    ///
    /// Returns `None` when a membership already exists for the pair; the
    /// caller reports success either way and must not fire a second email.
    pub async fn join(
        pool: &sqlx::PgPool,
        user_id: &str,
        event_id: Uuid,
        confirmed: bool,
    ) -> Result<Option<Membership>, sqlx::Error> {
        sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO user_events (user_id, event_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, event_id) DO NOTHING
            RETURNING id, user_id, event_id, status, tf_image, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(confirmed)
        .fetch_optional(pool)
        .await
    }

    /// Flip the caller's awaiting-payment membership to confirmed.
    ///
    /// The conditional `status = false` guard means a repeat call finds
    /// nothing to confirm, so the "payment done" email fires exactly once.
    /// Returns `None` when there is no unpaid membership for the pair; that
    /// is a recoverable no-op, not an error.
    pub async fn confirm_payment(
        pool: &sqlx::PgPool,
        user_id: &str,
        event_id: Uuid,
        tf_image: Option<String>,
    ) -> Result<Option<Membership>, sqlx::Error> {
        sqlx::query_as::<_, Membership>(
            r#"
            UPDATE user_events
            SET status = true, tf_image = COALESCE($3, tf_image)
            WHERE user_id = $1 AND event_id = $2 AND status = false
            RETURNING id, user_id, event_id, status, tf_image, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(tf_image)
        .fetch_optional(pool)
        .await
    }
}

/// The caller's membership for one event, if any.
#[derive(Debug, Clone)]
pub struct GetMembership {
    pub user_id: String,
    pub event_id: Uuid,
}

impl Processor<GetMembership> for DatabaseProcessor {
    type Output = Option<Membership>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetMembership")]
    async fn process(&self, query: GetMembership) -> Result<Option<Membership>, sqlx::Error> {
        sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, user_id, event_id, status, tf_image, created_at
            FROM user_events
            WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(&query.user_id)
        .bind(query.event_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// A membership joined with its owning account, for organizer dashboards.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct MemberListed {
    pub id: Uuid,
    pub user_id: String,
    pub status: bool,
    pub tf_image: Option<String>,
    pub created_at: time::PrimitiveDateTime,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ListEventMembers {
    pub event_id: Uuid,
}

impl Processor<ListEventMembers> for DatabaseProcessor {
    type Output = Vec<MemberListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListEventMembers")]
    async fn process(&self, query: ListEventMembers) -> Result<Vec<MemberListed>, sqlx::Error> {
        sqlx::query_as::<_, MemberListed>(
            r#"
            SELECT
                m.id, m.user_id, m.status, m.tf_image, m.created_at,
                u.name AS user_name, u.email AS user_email, u.image AS user_image
            FROM user_events m
            JOIN users u ON u.id = m.user_id
            WHERE m.event_id = $1
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(query.event_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Confirmed-member count, the basis of the settlement amount.
#[derive(Debug, Clone, Copy)]
pub struct CountConfirmedMembers {
    pub event_id: Uuid,
}

impl Processor<CountConfirmedMembers> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountConfirmedMembers")]
    async fn process(&self, query: CountConfirmedMembers) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_events WHERE event_id = $1 AND status = true")
                .bind(query.event_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

/// One row of a user's join history, with enough event data for the UI.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub status: bool,
    pub created_at: time::PrimitiveDateTime,
    pub event_name: String,
    pub event_image: Option<String>,
    pub event_date: time::PrimitiveDateTime,
    pub price: Decimal,
    /// Revealed only on confirmed memberships; empty otherwise.
    pub link_group: String,
}

#[derive(Debug, Clone)]
pub struct ListUserEventHistory {
    pub user_id: String,
}

impl Processor<ListUserEventHistory> for DatabaseProcessor {
    type Output = Vec<HistoryEntry>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListUserEventHistory")]
    async fn process(&self, query: ListUserEventHistory) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT
                m.id, m.event_id, m.status, m.created_at,
                e.name AS event_name, e.image AS event_image,
                e.event_date, e.price,
                CASE WHEN m.status THEN e.link_group ELSE '' END AS link_group
            FROM user_events m
            JOIN events e ON e.id = m.event_id
            WHERE m.user_id = $1
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(&query.user_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Most recent confirmed memberships for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct RecentTransaction {
    pub user_name: String,
    pub user_email: String,
    pub event_name: String,
    pub price: Decimal,
    pub created_at: time::PrimitiveDateTime,
}

#[derive(Debug, Clone, Copy)]
pub struct ListRecentTransactions {
    pub limit: i64,
}

impl Processor<ListRecentTransactions> for DatabaseProcessor {
    type Output = Vec<RecentTransaction>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListRecentTransactions")]
    async fn process(
        &self,
        query: ListRecentTransactions,
    ) -> Result<Vec<RecentTransaction>, sqlx::Error> {
        sqlx::query_as::<_, RecentTransaction>(
            r#"
            SELECT
                u.name AS user_name, u.email AS user_email,
                e.name AS event_name, e.price, m.created_at
            FROM user_events m
            JOIN users u ON u.id = m.user_id
            JOIN events e ON e.id = m.event_id
            WHERE m.status = true
            ORDER BY m.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::UserRole;
    use crate::entities::channel::{Channel, ChannelInsert};
    use crate::entities::event::{Event, EventInsert};
    use crate::entities::user::{User, UserInsert};
    use time::macros::datetime;

    /// Organizer, channel, one paid event, and a prospective member.
    /// Returns the member's id and the event id.
    async fn seed_paid_event(pool: &sqlx::PgPool) -> (String, Uuid) {
        let organizer = User::provision(
            pool,
            UserInsert {
                id: "organizer".into(),
                name: "Organizer".into(),
                email: "organizer@example.com".into(),
                image: None,
                role: UserRole::User,
            },
        )
        .await
        .unwrap()
        .unwrap();
        let member = User::provision(
            pool,
            UserInsert {
                id: "member".into(),
                name: "Member".into(),
                email: "member@example.com".into(),
                image: None,
                role: UserRole::User,
            },
        )
        .await
        .unwrap()
        .unwrap();
        let channel = Channel::create(
            pool,
            ChannelInsert {
                user_id: organizer.id,
                name: "Research Talks".into(),
                description: "Weekly seminars".into(),
                image: None,
                id_card_image: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
        let event = Event::create(
            pool,
            EventInsert {
                channel_id: channel.id,
                tag_id: None,
                category_id: None,
                name: "Paid Seminar".into(),
                description: "A ticketed talk".into(),
                image: None,
                location: "Hall B".into(),
                link_group: "https://chat.example/group".into(),
                event_date: datetime!(2026-10-01 9:00),
                price: Decimal::from(10_000),
                is_paid: true,
                post_duration: 7,
            },
        )
        .await
        .unwrap();
        (member.id, event.id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn joining_twice_keeps_a_single_membership(pool: sqlx::PgPool) {
        let (user_id, event_id) = seed_paid_event(&pool).await;

        let first = Membership::join(&pool, &user_id, event_id, false)
            .await
            .unwrap();
        assert!(first.is_some());

        // The repeat join is a success with nothing to report.
        let second = Membership::join(&pool, &user_id, event_id, false)
            .await
            .unwrap();
        assert!(second.is_none());

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_events WHERE user_id = $1 AND event_id = $2",
        )
        .bind(&user_id)
        .bind(event_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn payment_confirms_exactly_once(pool: sqlx::PgPool) {
        let (user_id, event_id) = seed_paid_event(&pool).await;
        Membership::join(&pool, &user_id, event_id, false)
            .await
            .unwrap();

        let first = Membership::confirm_payment(&pool, &user_id, event_id, None)
            .await
            .unwrap();
        assert!(first.is_some_and(|m| m.status));

        // The conditional update finds no unpaid row the second time,
        // so the caller knows not to fire another mail.
        let second = Membership::confirm_payment(&pool, &user_id, event_id, None)
            .await
            .unwrap();
        assert!(second.is_none());
    }
}
