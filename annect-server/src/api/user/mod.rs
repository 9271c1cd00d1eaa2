//! Signed-in user API handlers.
//!
//! Every endpoint here extracts `RequireUser`; anonymous callers are
//! rejected with the sign-in condition before the handler body runs.
//!
//! # Endpoints
//!
//! - `POST /provision`                        – upsert the caller's account
//! - `POST /channels`                         – create the caller's channel
//! - `POST /channels/{channel_id}/follow`     – toggle following a channel
//! - `POST /events`                           – create an event (organizer)
//! - `POST /events/{event_id}/payment`        – confirm the listing fee
//! - `POST /events/{event_id}/join`           – join an event
//! - `POST /events/{event_id}/payment-done`   – confirm a member payment
//! - `POST /events/{event_id}/favorite`       – toggle favoriting an event
//! - `POST /events/{event_id}/report`         – report an event
//! - `POST /events/{event_id}/withdraw`       – request a settlement payout
//! - `GET  /events/{event_id}/analytics`      – organizer analytics
//! - `GET  /event-histories`                  – the caller's join history
//!
//! The gateway handoff lives at the top level (`POST /api/transactions`)
//! and is exposed through [`transactions_router`].

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use annect_core::payment::GatewayError;
use annect_core::pricing::PricingError;

use crate::state::AppState;

mod confirm_payment;
mod create_channel;
mod create_event;
mod create_transaction;
mod event_analytics;
mod event_history;
mod follow_channel;
mod join_event;
mod pay_listing_fee;
mod provision;
mod report_event;
mod request_withdraw;
mod toggle_favorite;

/// Build the user API router, nested under `/api/user`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/provision", post(provision::provision))
        .route("/channels", post(create_channel::create_channel))
        .route(
            "/channels/{channel_id}/follow",
            post(follow_channel::follow_channel),
        )
        .route("/events", post(create_event::create_event))
        .route(
            "/events/{event_id}/payment",
            post(pay_listing_fee::pay_listing_fee),
        )
        .route("/events/{event_id}/join", post(join_event::join_event))
        .route(
            "/events/{event_id}/payment-done",
            post(confirm_payment::confirm_payment),
        )
        .route(
            "/events/{event_id}/favorite",
            post(toggle_favorite::toggle_favorite),
        )
        .route("/events/{event_id}/report", post(report_event::report_event))
        .route(
            "/events/{event_id}/withdraw",
            post(request_withdraw::request_withdraw),
        )
        .route(
            "/events/{event_id}/analytics",
            get(event_analytics::event_analytics),
        )
        .route("/event-histories", get(event_history::event_history))
}

/// The gateway handoff keeps its historical top-level path.
pub fn transactions_router() -> Router<AppState> {
    Router::new().route(
        "/api/transactions",
        post(create_transaction::create_transaction),
    )
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in user API handlers.
#[derive(Debug)]
pub(crate) enum UserApiError {
    Database(sqlx::Error),
    NotFound,
    /// The operation needs an organizer channel the caller does not have.
    ChannelRequired,
    /// The caller already owns a channel.
    ChannelExists,
    /// Pricing input violated the paid/free invariant.
    InvalidPricing(PricingError),
    /// A payment was requested for a free event.
    FreeEvent,
    /// The caller's channel does not own the target event.
    NotOwner,
    Gateway(GatewayError),
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            UserApiError::Database(e) => {
                tracing::error!(error = %e, "User API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            UserApiError::NotFound => (StatusCode::NOT_FOUND, "resource not found").into_response(),
            UserApiError::ChannelRequired => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "an organizer channel is required",
            )
                .into_response(),
            UserApiError::ChannelExists => {
                (StatusCode::CONFLICT, "channel already exists").into_response()
            }
            UserApiError::InvalidPricing(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            UserApiError::FreeEvent => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "free events have no payment",
            )
                .into_response(),
            UserApiError::NotOwner => {
                (StatusCode::FORBIDDEN, "not the event organizer").into_response()
            }
            UserApiError::Gateway(e) => {
                tracing::error!(error = %e, "Payment gateway error");
                (StatusCode::BAD_GATEWAY, "payment gateway error").into_response()
            }
        }
    }
}
