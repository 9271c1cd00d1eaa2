//! Favorite (user-event) and follow (user-channel) join rows.
//!
//! Both are existence-only toggles. The toggle is an atomic
//! insert-on-conflict followed by a delete when the insert hit the unique
//! constraint, so two consecutive calls always return to the original
//! state and concurrent toggles cannot create duplicate rows.

use uuid::Uuid;

/// Outcome of a toggle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Added,
    Removed,
}

pub struct Favorite;

impl Favorite {
    /// Flip the favorite state for `(user, event)`.
    pub async fn toggle(
        pool: &sqlx::PgPool,
        user_id: &str,
        event_id: Uuid,
    ) -> Result<Toggle, sqlx::Error> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, event_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, event_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            return Ok(Toggle::Added);
        }

        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(Toggle::Removed)
    }
}

pub struct Follow;

impl Follow {
    /// Flip the follow state for `(user, channel)`.
    pub async fn toggle(
        pool: &sqlx::PgPool,
        user_id: &str,
        channel_id: Uuid,
    ) -> Result<Toggle, sqlx::Error> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO follows (user_id, channel_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, channel_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(channel_id)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            return Ok(Toggle::Added);
        }

        sqlx::query("DELETE FROM follows WHERE user_id = $1 AND channel_id = $2")
            .bind(user_id)
            .bind(channel_id)
            .execute(pool)
            .await?;
        Ok(Toggle::Removed)
    }

    /// Email addresses of everyone following a channel, for broadcast mail.
    pub async fn follower_emails(
        pool: &sqlx::PgPool,
        channel_id: Uuid,
    ) -> Result<Vec<(String, String)>, sqlx::Error> {
        sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT u.email, u.name
            FROM follows f
            JOIN users u ON u.id = f.user_id
            WHERE f.channel_id = $1
            "#,
        )
        .bind(channel_id)
        .fetch_all(pool)
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
    use rust_decimal::Decimal;
    use time::macros::datetime;

    /// A user, a channel, and one event. Returns (user id, channel id,
    /// event id).
    async fn seed(pool: &sqlx::PgPool) -> (String, Uuid, Uuid) {
        let user = User::provision(
            pool,
            UserInsert {
                id: "user".into(),
                name: "User".into(),
                email: "user@example.com".into(),
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
                user_id: user.id.clone(),
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
                name: "Seminar".into(),
                description: "A talk".into(),
                image: None,
                location: "Hall B".into(),
                link_group: "https://chat.example/group".into(),
                event_date: datetime!(2026-10-01 9:00),
                price: Decimal::ZERO,
                is_paid: false,
                post_duration: 7,
            },
        )
        .await
        .unwrap();
        (user.id, channel.id, event.id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn favorite_toggle_returns_to_the_original_state(pool: sqlx::PgPool) {
        let (user_id, _, event_id) = seed(&pool).await;

        assert_eq!(
            Favorite::toggle(&pool, &user_id, event_id).await.unwrap(),
            Toggle::Added
        );
        assert_eq!(
            Favorite::toggle(&pool, &user_id, event_id).await.unwrap(),
            Toggle::Removed
        );

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn follow_toggle_returns_to_the_original_state(pool: sqlx::PgPool) {
        let (user_id, channel_id, _) = seed(&pool).await;

        assert_eq!(
            Follow::toggle(&pool, &user_id, channel_id).await.unwrap(),
            Toggle::Added
        );
        assert_eq!(
            Follow::toggle(&pool, &user_id, channel_id).await.unwrap(),
            Toggle::Removed
        );

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM follows WHERE user_id = $1")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
