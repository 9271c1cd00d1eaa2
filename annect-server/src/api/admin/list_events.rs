use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;

use annect_core::entities::event::ListAllEvents;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

/// `GET /events` — every event regardless of status, for review.
pub async fn list_events(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let events = processor
        .process(ListAllEvents)
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(events))
}
