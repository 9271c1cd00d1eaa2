use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;

use annect_core::entities::withdraw::ListWithdrawRequests;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

/// `GET /withdraws` — withdraw requests with event and requester info.
pub async fn list_withdraws(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let requests = processor
        .process(ListWithdrawRequests)
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(requests))
}
