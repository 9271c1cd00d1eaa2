use axum::{Json, extract::Path, response::IntoResponse};
use uuid::Uuid;

use annect_core::entities::event::{Event, EventVerification};

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

/// `POST /events/{event_id}/verify` — publish a pending event.
///
/// An event that already left `pending` verifies as an idempotent no-op.
/// Listing-fee payment is the reviewer's precondition; it is not
/// re-checked here.
pub async fn verify_event(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AdminApiError> {
    let outcome = Event::verify(&state.db, event_id)
        .await
        .map_err(AdminApiError::Database)?;

    match outcome {
        EventVerification::Verified | EventVerification::Noop => {
            Ok(Json(serde_json::json!({ "verified": true })))
        }
        EventVerification::NotFound => Err(AdminApiError::NotFound),
    }
}
