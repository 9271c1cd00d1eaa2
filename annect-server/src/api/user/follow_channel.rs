use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::channel::GetChannelById;
use annect_core::entities::favorite::{Follow, Toggle};
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

/// `POST /channels/{channel_id}/follow` — flip the caller's follow state.
///
/// Two consecutive calls restore the original state.
pub async fn follow_channel(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(channel_id): Path<Uuid>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    processor
        .process(GetChannelById { channel_id })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    let outcome = Follow::toggle(&state.db, &caller.id, channel_id)
        .await
        .map_err(UserApiError::Database)?;

    Ok(Json(serde_json::json!({
        "followed": outcome == Toggle::Added,
    })))
}
