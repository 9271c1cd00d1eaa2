//! Settlement: organizer withdraw requests against concluded events.
//!
//! The amount is fixed at request time (confirmed members x event price)
//! and never recomputed. Acceptance is a one-way flip with no reversal.

use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct WithdrawRequest {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Uuid,
    pub amount: Decimal,
    /// false = pending review, true = accepted.
    pub status: bool,
    pub created_at: time::PrimitiveDateTime,
}

impl WithdrawRequest {
    pub async fn create(
        pool: &sqlx::PgPool,
        user_id: &str,
        event_id: Uuid,
        amount: Decimal,
    ) -> Result<WithdrawRequest, sqlx::Error> {
        sqlx::query_as::<_, WithdrawRequest>(
            r#"
            INSERT INTO withdraw_requests (user_id, event_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, event_id, amount, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(amount)
        .fetch_one(pool)
        .await
    }

    /// Admin acceptance: pending -> accepted. Accepting twice is a no-op
    /// that still reports the current row.
    pub async fn accept(
        pool: &sqlx::PgPool,
        id: Uuid,
    ) -> Result<Option<WithdrawRequest>, sqlx::Error> {
        sqlx::query_as::<_, WithdrawRequest>(
            r#"
            UPDATE withdraw_requests SET status = true
            WHERE id = $1
            RETURNING id, user_id, event_id, amount, status, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

/// A withdraw request joined with its event and requester, for the admin
/// review table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct WithdrawListed {
    pub id: Uuid,
    pub event_id: Uuid,
    pub amount: Decimal,
    pub status: bool,
    pub created_at: time::PrimitiveDateTime,
    pub event_name: String,
    pub event_image: Option<String>,
    pub event_date: time::PrimitiveDateTime,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ListWithdrawRequests;

impl Processor<ListWithdrawRequests> for DatabaseProcessor {
    type Output = Vec<WithdrawListed>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListWithdrawRequests")]
    async fn process(
        &self,
        _query: ListWithdrawRequests,
    ) -> Result<Vec<WithdrawListed>, sqlx::Error> {
        sqlx::query_as::<_, WithdrawListed>(
            r#"
            SELECT
                w.id, w.event_id, w.amount, w.status, w.created_at,
                e.name AS event_name, e.image AS event_image, e.event_date,
                u.name AS user_name, u.email AS user_email
            FROM withdraw_requests w
            JOIN events e ON e.id = w.event_id
            JOIN users u ON u.id = w.user_id
            ORDER BY w.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
