//! Scheduler-facing endpoints, authenticated with the shared cron secret.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};

use annect_core::entities::event::Event;

use crate::api::extractors::CronAuth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/expire", post(expire_events))
}

#[derive(serde::Serialize)]
struct SweepOutcome {
    expired: u64,
}

/// `POST /api/internal/expire` — close every ongoing event whose
/// visibility window has elapsed. Idempotent; re-running is harmless.
async fn expire_events(
    _auth: CronAuth,
    state: State<AppState>,
) -> Result<impl IntoResponse, InternalApiError> {
    let expired = Event::expire_due(&state.db)
        .await
        .map_err(InternalApiError::Database)?;

    if expired > 0 {
        tracing::info!(expired, "Expired due events");
    }

    Ok(Json(SweepOutcome { expired }))
}

#[derive(Debug)]
enum InternalApiError {
    Database(sqlx::Error),
}

impl IntoResponse for InternalApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            InternalApiError::Database(e) => {
                tracing::error!(error = %e, "Internal API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
