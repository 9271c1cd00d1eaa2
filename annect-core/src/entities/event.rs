//! Event rows and the PENDING -> ONGOING -> DONE lifecycle.
//!
//! Both lifecycle transitions are single conditional updates so they stay
//! idempotent under concurrent invocation: verification only moves rows out
//! of `pending`, and the expiry sweep only moves `ongoing` rows whose paid
//! visibility has lapsed. Nothing ever moves backwards.

use crate::entities::EventStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Event {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub tag_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location: String,
    /// Private group-join link revealed to confirmed members.
    pub link_group: String,
    pub event_date: time::PrimitiveDateTime,
    pub price: Decimal,
    pub is_paid: bool,
    /// Days of paid visibility purchased by the organizer.
    pub post_duration: i32,
    pub status: EventStatus,
    pub listing_fee_paid: bool,
    pub payment_proof: Option<String>,
    pub created_at: time::PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInsert {
    pub channel_id: Uuid,
    pub tag_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location: String,
    pub link_group: String,
    pub event_date: time::PrimitiveDateTime,
    pub price: Decimal,
    pub is_paid: bool,
    pub post_duration: i32,
}

/// Result of the admin verification update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventVerification {
    Verified,
    /// The event was not `pending`; verification is an idempotent no-op.
    Noop,
    NotFound,
}

impl Event {
    /// Insert a new event in `pending` with the listing fee unpaid.
    pub async fn create(pool: &sqlx::PgPool, insert: EventInsert) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (channel_id, tag_id, category_id, name, description, image,
                 location, link_group, event_date, price, is_paid, post_duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING
                id, channel_id, tag_id, category_id, name, description, image,
                location, link_group, event_date, price, is_paid, post_duration,
                status, listing_fee_paid, payment_proof, created_at
            "#,
        )
        .bind(insert.channel_id)
        .bind(insert.tag_id)
        .bind(insert.category_id)
        .bind(&insert.name)
        .bind(&insert.description)
        .bind(&insert.image)
        .bind(&insert.location)
        .bind(&insert.link_group)
        .bind(insert.event_date)
        .bind(insert.price)
        .bind(insert.is_paid)
        .bind(insert.post_duration)
        .fetch_one(pool)
        .await
    }

    /// PENDING -> ONGOING. Listing-fee payment is a precondition enforced
    /// by the calling surface, not re-validated here.
    pub async fn verify(
        pool: &sqlx::PgPool,
        event_id: Uuid,
    ) -> Result<EventVerification, sqlx::Error> {
        let updated =
            sqlx::query("UPDATE events SET status = 'ongoing' WHERE id = $1 AND status = 'pending'")
                .bind(event_id)
                .execute(pool)
                .await?;

        if updated.rows_affected() > 0 {
            return Ok(EventVerification::Verified);
        }

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM events WHERE id = $1)")
                .bind(event_id)
                .fetch_one(pool)
                .await?;
        if exists {
            Ok(EventVerification::Noop)
        } else {
            Ok(EventVerification::NotFound)
        }
    }

    /// ONGOING -> DONE for every event whose visibility window has lapsed.
    ///
    /// A single conditional update keyed on the current status, so the sweep
    /// is idempotent and safe to run concurrently with itself. Returns the
    /// number of events transitioned.
    pub async fn expire_due(pool: &sqlx::PgPool) -> Result<u64, sqlx::Error> {
        let updated = sqlx::query(
            r#"
            UPDATE events SET status = 'done'
            WHERE status = 'ongoing'
              AND created_at + make_interval(days => post_duration) <= now()
            "#,
        )
        .execute(pool)
        .await?;
        Ok(updated.rows_affected())
    }

    /// Record the organizer's listing-fee payment as confirmed.
    ///
    /// Trusts the client-reported gateway success; there is no independent
    /// reconciliation against the gateway's ledger.
    pub async fn mark_listing_fee_paid(
        pool: &sqlx::PgPool,
        event_id: Uuid,
        payment_proof: Option<String>,
    ) -> Result<bool, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE events SET listing_fee_paid = true, payment_proof = COALESCE($2, payment_proof) WHERE id = $1",
        )
        .bind(event_id)
        .bind(payment_proof)
        .execute(pool)
        .await?;
        Ok(updated.rows_affected() > 0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetEventById {
    pub event_id: Uuid,
}

impl Processor<GetEventById> for DatabaseProcessor {
    type Output = Option<Event>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventById")]
    async fn process(&self, query: GetEventById) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT
                id, channel_id, tag_id, category_id, name, description, image,
                location, link_group, event_date, price, is_paid, post_duration,
                status, listing_fee_paid, payment_proof, created_at
            FROM events WHERE id = $1
            "#,
        )
        .bind(query.event_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// An event annotated for a listing: tag/category names plus whether the
/// requesting identity has favorited it (false for anonymous callers).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct EventListed {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location: String,
    pub event_date: time::PrimitiveDateTime,
    pub price: Decimal,
    pub is_paid: bool,
    pub status: EventStatus,
    pub created_at: time::PrimitiveDateTime,
    pub tag_name: Option<String>,
    pub category_name: Option<String>,
    pub is_favorite: bool,
}

/// Public event listing. Always restricted to `status = 'ongoing'`.
#[derive(Debug, Clone, Default)]
pub struct ListPublicEvents {
    /// Case-insensitive name substring filter.
    pub name: Option<String>,
    /// Tag set membership; empty means no tag filter.
    pub tag_ids: Vec<Uuid>,
    /// Category set membership; empty means no category filter.
    pub category_ids: Vec<Uuid>,
    /// Paid/free filter, applied only when exactly one side is selected.
    pub is_paid: Option<bool>,
    /// Requesting identity for the `is_favorite` annotation.
    pub viewer: Option<String>,
}

impl Processor<ListPublicEvents> for DatabaseProcessor {
    type Output = Vec<EventListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListPublicEvents")]
    async fn process(&self, query: ListPublicEvents) -> Result<Vec<EventListed>, sqlx::Error> {
        sqlx::query_as::<_, EventListed>(
            r#"
            SELECT
                e.id, e.channel_id, e.name, e.description, e.image, e.location,
                e.event_date, e.price, e.is_paid, e.status, e.created_at,
                t.name AS tag_name,
                c.name AS category_name,
                EXISTS (
                    SELECT 1 FROM favorites f
                    WHERE f.event_id = e.id AND f.user_id = $5
                ) AS is_favorite
            FROM events e
            LEFT JOIN tags t ON t.id = e.tag_id
            LEFT JOIN categories c ON c.id = e.category_id
            WHERE e.status = 'ongoing'
              AND ($1::text IS NULL OR e.name ILIKE '%' || $1 || '%')
              AND (cardinality($2::uuid[]) = 0 OR e.tag_id = ANY($2))
              AND (cardinality($3::uuid[]) = 0 OR e.category_id = ANY($3))
              AND ($4::bool IS NULL OR e.is_paid = $4)
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(&query.name)
        .bind(&query.tag_ids)
        .bind(&query.category_ids)
        .bind(query.is_paid)
        .bind(&query.viewer)
        .fetch_all(&self.pool)
        .await
    }
}

/// Single event detail with the same annotations as the listing, but
/// without the status restriction.
#[derive(Debug, Clone)]
pub struct GetEventDetail {
    pub event_id: Uuid,
    pub viewer: Option<String>,
}

impl Processor<GetEventDetail> for DatabaseProcessor {
    type Output = Option<EventListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventDetail")]
    async fn process(&self, query: GetEventDetail) -> Result<Option<EventListed>, sqlx::Error> {
        sqlx::query_as::<_, EventListed>(
            r#"
            SELECT
                e.id, e.channel_id, e.name, e.description, e.image, e.location,
                e.event_date, e.price, e.is_paid, e.status, e.created_at,
                t.name AS tag_name,
                c.name AS category_name,
                EXISTS (
                    SELECT 1 FROM favorites f
                    WHERE f.event_id = e.id AND f.user_id = $2
                ) AS is_favorite
            FROM events e
            LEFT JOIN tags t ON t.id = e.tag_id
            LEFT JOIN categories c ON c.id = e.category_id
            WHERE e.id = $1
            "#,
        )
        .bind(query.event_id)
        .bind(&query.viewer)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Every event regardless of status, for the admin review table.
#[derive(Debug, Clone, Copy)]
pub struct ListAllEvents;

impl Processor<ListAllEvents> for DatabaseProcessor {
    type Output = Vec<Event>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListAllEvents")]
    async fn process(&self, _query: ListAllEvents) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT
                id, channel_id, tag_id, category_id, name, description, image,
                location, link_group, event_date, price, is_paid, post_duration,
                status, listing_fee_paid, payment_proof, created_at
            FROM events
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// Events published under one channel, for the channel detail page.
#[derive(Debug, Clone)]
pub struct ListChannelEvents {
    pub channel_id: Uuid,
    pub viewer: Option<String>,
}

impl Processor<ListChannelEvents> for DatabaseProcessor {
    type Output = Vec<EventListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListChannelEvents")]
    async fn process(&self, query: ListChannelEvents) -> Result<Vec<EventListed>, sqlx::Error> {
        sqlx::query_as::<_, EventListed>(
            r#"
            SELECT
                e.id, e.channel_id, e.name, e.description, e.image, e.location,
                e.event_date, e.price, e.is_paid, e.status, e.created_at,
                t.name AS tag_name,
                c.name AS category_name,
                EXISTS (
                    SELECT 1 FROM favorites f
                    WHERE f.event_id = e.id AND f.user_id = $2
                ) AS is_favorite
            FROM events e
            LEFT JOIN tags t ON t.id = e.tag_id
            LEFT JOIN categories c ON c.id = e.category_id
            WHERE e.channel_id = $1 AND e.status = 'ongoing'
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(query.channel_id)
        .bind(&query.viewer)
        .fetch_all(&self.pool)
        .await
    }
}

/// Dashboard statistic.
#[derive(Debug, Clone, Copy)]
pub struct CountEvents;

impl Processor<CountEvents> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountEvents")]
    async fn process(&self, _query: CountEvents) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Sum of `post_duration` over paid events. Platform revenue is this total
/// multiplied by the configured per-day listing rate.
#[derive(Debug, Clone, Copy)]
pub struct SumPaidPostDurations;

impl Processor<SumPaidPostDurations> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:SumPaidPostDurations")]
    async fn process(&self, _query: SumPaidPostDurations) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(post_duration), 0)::bigint FROM events WHERE is_paid = true",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::UserRole;
    use crate::entities::channel::{Channel, ChannelInsert};
    use crate::entities::user::{User, UserInsert};
    use time::macros::datetime;

    async fn seed_channel(pool: &sqlx::PgPool) -> Uuid {
        let owner = User::provision(
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
        Channel::create(
            pool,
            ChannelInsert {
                user_id: owner.id,
                name: "Research Talks".into(),
                description: "Weekly seminars".into(),
                image: None,
                id_card_image: None,
            },
        )
        .await
        .unwrap()
        .unwrap()
        .id
    }

    async fn seed_ongoing_event(pool: &sqlx::PgPool, channel_id: Uuid, post_duration: i32) -> Uuid {
        let event = Event::create(
            pool,
            EventInsert {
                channel_id,
                tag_id: None,
                category_id: None,
                name: format!("Seminar ({post_duration}d)"),
                description: "A talk".into(),
                image: None,
                location: "Hall B".into(),
                link_group: "https://chat.example/group".into(),
                event_date: datetime!(2026-10-01 9:00),
                price: Decimal::ZERO,
                is_paid: false,
                post_duration,
            },
        )
        .await
        .unwrap();
        assert_eq!(
            Event::verify(pool, event.id).await.unwrap(),
            EventVerification::Verified
        );
        event.id
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn expiry_sweep_is_idempotent_and_only_takes_due_events(pool: sqlx::PgPool) {
        let channel_id = seed_channel(&pool).await;
        let due = seed_ongoing_event(&pool, channel_id, 0).await;
        let not_due = seed_ongoing_event(&pool, channel_id, 365).await;

        assert_eq!(Event::expire_due(&pool).await.unwrap(), 1);
        // Nothing left to expire; re-running is harmless.
        assert_eq!(Event::expire_due(&pool).await.unwrap(), 0);

        let processor = DatabaseProcessor::new(pool.clone());
        let due = processor
            .process(GetEventById { event_id: due })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(due.status, EventStatus::Done);
        let not_due = processor
            .process(GetEventById { event_id: not_due })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(not_due.status, EventStatus::Ongoing);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn re_verifying_a_published_event_is_a_noop(pool: sqlx::PgPool) {
        let channel_id = seed_channel(&pool).await;
        let event_id = seed_ongoing_event(&pool, channel_id, 7).await;

        assert_eq!(
            Event::verify(&pool, event_id).await.unwrap(),
            EventVerification::Noop
        );
    }
}
