//! Organizer profiles ("channels") under which events are published.
//!
//! A user owns at most one channel (unique constraint on `user_id`), starts
//! out unverified, and is promoted to verified by an admin exactly once.

use crate::entities::ChannelStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Channel {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub id_card_image: Option<String>,
    pub status: ChannelStatus,
    pub created_at: time::PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInsert {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    /// Identity document submitted for verification review.
    pub id_card_image: Option<String>,
}

/// Result of the admin verification update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelVerification {
    Verified,
    /// Re-verifying a verified channel is a user-visible condition,
    /// not a silent no-op.
    AlreadyVerified,
    NotFound,
}

impl Channel {
    /// Create the caller's channel.
    ///
    /// Returns `None` when the caller already owns a channel; the unique
    /// constraint on `user_id` makes concurrent creations safe.
    pub async fn create(
        pool: &sqlx::PgPool,
        insert: ChannelInsert,
    ) -> Result<Option<Channel>, sqlx::Error> {
        let channel = sqlx::query_as::<_, Channel>(
            r#"
            INSERT INTO channels (user_id, name, description, image, id_card_image)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING id, user_id, name, description, image, id_card_image, status, created_at
            "#,
        )
        .bind(&insert.user_id)
        .bind(&insert.name)
        .bind(&insert.description)
        .bind(&insert.image)
        .bind(&insert.id_card_image)
        .fetch_optional(pool)
        .await?;
        Ok(channel)
    }

    /// UNVERIFIED -> VERIFIED, guarded in a single conditional update.
    pub async fn verify(
        pool: &sqlx::PgPool,
        channel_id: Uuid,
    ) -> Result<ChannelVerification, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE channels SET status = 'verified' WHERE id = $1 AND status = 'unverified'",
        )
        .bind(channel_id)
        .execute(pool)
        .await?;

        if updated.rows_affected() > 0 {
            return Ok(ChannelVerification::Verified);
        }

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM channels WHERE id = $1)")
                .bind(channel_id)
                .fetch_one(pool)
                .await?;
        if exists {
            Ok(ChannelVerification::AlreadyVerified)
        } else {
            Ok(ChannelVerification::NotFound)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetChannelById {
    pub channel_id: Uuid,
}

impl Processor<GetChannelById> for DatabaseProcessor {
    type Output = Option<Channel>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetChannelById")]
    async fn process(&self, query: GetChannelById) -> Result<Option<Channel>, sqlx::Error> {
        sqlx::query_as::<_, Channel>(
            r#"
            SELECT id, user_id, name, description, image, id_card_image, status, created_at
            FROM channels WHERE id = $1
            "#,
        )
        .bind(query.channel_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Look up the channel owned by a user, if any. Creating an event requires
/// this to succeed.
#[derive(Debug, Clone)]
pub struct GetChannelByOwner {
    pub user_id: String,
}

impl Processor<GetChannelByOwner> for DatabaseProcessor {
    type Output = Option<Channel>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetChannelByOwner")]
    async fn process(&self, query: GetChannelByOwner) -> Result<Option<Channel>, sqlx::Error> {
        sqlx::query_as::<_, Channel>(
            r#"
            SELECT id, user_id, name, description, image, id_card_image, status, created_at
            FROM channels WHERE user_id = $1
            "#,
        )
        .bind(&query.user_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// A channel annotated for a public listing: follower count plus whether
/// the requesting identity follows it (always false for anonymous callers).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct ChannelListed {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub status: ChannelStatus,
    pub created_at: time::PrimitiveDateTime,
    pub followers: i64,
    pub is_followed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListChannels {
    /// Case-insensitive name substring filter.
    pub name: Option<String>,
    /// Requesting identity, for the `is_followed` annotation.
    pub viewer: Option<String>,
}

impl Processor<ListChannels> for DatabaseProcessor {
    type Output = Vec<ChannelListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListChannels")]
    async fn process(&self, query: ListChannels) -> Result<Vec<ChannelListed>, sqlx::Error> {
        sqlx::query_as::<_, ChannelListed>(
            r#"
            SELECT
                c.id, c.user_id, c.name, c.description, c.image, c.status, c.created_at,
                COUNT(f.user_id) AS followers,
                COALESCE(BOOL_OR(f.user_id = $2), false) AS is_followed
            FROM channels c
            LEFT JOIN follows f ON f.channel_id = c.id
            WHERE ($1::text IS NULL OR c.name ILIKE '%' || $1 || '%')
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(&query.name)
        .bind(&query.viewer)
        .fetch_all(&self.pool)
        .await
    }
}

/// Single annotated channel, for the channel detail page.
#[derive(Debug, Clone)]
pub struct GetChannelListed {
    pub channel_id: Uuid,
    pub viewer: Option<String>,
}

impl Processor<GetChannelListed> for DatabaseProcessor {
    type Output = Option<ChannelListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetChannelListed")]
    async fn process(&self, query: GetChannelListed) -> Result<Option<ChannelListed>, sqlx::Error> {
        sqlx::query_as::<_, ChannelListed>(
            r#"
            SELECT
                c.id, c.user_id, c.name, c.description, c.image, c.status, c.created_at,
                COUNT(f.user_id) AS followers,
                COALESCE(BOOL_OR(f.user_id = $2), false) AS is_followed
            FROM channels c
            LEFT JOIN follows f ON f.channel_id = c.id
            WHERE c.id = $1
            GROUP BY c.id
            "#,
        )
        .bind(query.channel_id)
        .bind(&query.viewer)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Dashboard statistic.
#[derive(Debug, Clone, Copy)]
pub struct CountChannels;

impl Processor<CountChannels> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountChannels")]
    async fn process(&self, _query: CountChannels) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM channels")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
