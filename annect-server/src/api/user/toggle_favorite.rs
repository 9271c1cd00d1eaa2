use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::event::GetEventById;
use annect_core::entities::favorite::{Favorite, Toggle};
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

/// `POST /events/{event_id}/favorite` — flip the caller's favorite state.
pub async fn toggle_favorite(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    processor
        .process(GetEventById { event_id })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    let outcome = Favorite::toggle(&state.db, &caller.id, event_id)
        .await
        .map_err(UserApiError::Database)?;

    Ok(Json(serde_json::json!({
        "favorited": outcome == Toggle::Added,
    })))
}
