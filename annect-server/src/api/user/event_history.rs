use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;

use annect_core::entities::membership::ListUserEventHistory;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

/// `GET /event-histories` — the caller's memberships with event data.
/// The group link is withheld while a paid join is still unconfirmed.
pub async fn event_history(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let entries = processor
        .process(ListUserEventHistory { user_id: caller.id })
        .await
        .map_err(UserApiError::Database)?;

    Ok(Json(entries))
}
