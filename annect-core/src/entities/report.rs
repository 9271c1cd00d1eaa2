//! User-submitted complaints about events. Append-only, no state machine.

use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Uuid,
    pub description: String,
    pub created_at: time::PrimitiveDateTime,
}

impl Report {
    pub async fn create(
        pool: &sqlx::PgPool,
        user_id: &str,
        event_id: Uuid,
        description: &str,
    ) -> Result<Report, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (user_id, event_id, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, event_id, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(description)
        .fetch_one(pool)
        .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct ReportListed {
    pub id: Uuid,
    pub description: String,
    pub created_at: time::PrimitiveDateTime,
    pub event_name: String,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ListReports;

impl Processor<ListReports> for DatabaseProcessor {
    type Output = Vec<ReportListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListReports")]
    async fn process(&self, _query: ListReports) -> Result<Vec<ReportListed>, sqlx::Error> {
        sqlx::query_as::<_, ReportListed>(
            r#"
            SELECT
                r.id, r.description, r.created_at,
                e.name AS event_name,
                u.name AS user_name, u.email AS user_email
            FROM reports r
            JOIN events e ON e.id = r.event_id
            JOIN users u ON u.id = r.user_id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
