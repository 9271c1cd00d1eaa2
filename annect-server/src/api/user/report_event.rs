use axum::{Json, extract::Path, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::event::GetEventById;
use annect_core::entities::report::Report;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

#[derive(Debug, serde::Deserialize)]
pub struct ReportEventRequest {
    pub description: String,
}

/// `POST /events/{event_id}/report` — file a report against an event.
/// Append-only; admins review the list.
pub async fn report_event(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<ReportEventRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    processor
        .process(GetEventById { event_id })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    let report = Report::create(&state.db, &caller.id, event_id, &body.description)
        .await
        .map_err(UserApiError::Database)?;

    Ok((StatusCode::CREATED, Json(report)))
}
