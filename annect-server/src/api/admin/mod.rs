//! Admin API handlers.
//!
//! Every endpoint here extracts `RequireAdmin`; the role comes from the
//! identity headers, never from an email comparison.
//!
//! # Endpoints
//!
//! - `GET  /dashboard`                        – platform totals
//! - `GET  /events`                           – every event, any status
//! - `GET  /withdraws`                        – withdraw requests for review
//! - `GET  /reports`                          – submitted reports
//! - `POST /events/{event_id}/verify`         – publish a pending event
//! - `POST /channels/{channel_id}/verify`     – verify a channel
//! - `POST /withdraws/{withdraw_id}/accept`   – accept a payout request

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::state::AppState;

mod accept_withdraw;
mod dashboard;
mod list_events;
mod list_reports;
mod list_withdraws;
mod verify_channel;
mod verify_event;

/// Build the admin API router, nested under `/api/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/events", get(list_events::list_events))
        .route("/withdraws", get(list_withdraws::list_withdraws))
        .route("/reports", get(list_reports::list_reports))
        .route(
            "/events/{event_id}/verify",
            post(verify_event::verify_event),
        )
        .route(
            "/channels/{channel_id}/verify",
            post(verify_channel::verify_channel),
        )
        .route(
            "/withdraws/{withdraw_id}/accept",
            post(accept_withdraw::accept_withdraw),
        )
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in admin API handlers.
#[derive(Debug)]
pub(crate) enum AdminApiError {
    Database(sqlx::Error),
    NotFound,
    /// Re-verifying an already verified channel.
    AlreadyVerified,
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminApiError::Database(e) => {
                tracing::error!(error = %e, "Admin API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AdminApiError::NotFound => {
                (StatusCode::NOT_FOUND, "resource not found").into_response()
            }
            AdminApiError::AlreadyVerified => {
                (StatusCode::CONFLICT, "channel already verified").into_response()
            }
        }
    }
}
