use axum::{Json, extract::Path, response::IntoResponse};
use uuid::Uuid;

use annect_core::entities::withdraw::WithdrawRequest;

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

/// `POST /withdraws/{withdraw_id}/accept` — approve a payout request.
/// Accepting twice is harmless; there is no reversal.
pub async fn accept_withdraw(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(withdraw_id): Path<Uuid>,
) -> Result<impl IntoResponse, AdminApiError> {
    let request = WithdrawRequest::accept(&state.db, withdraw_id)
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    Ok(Json(request))
}
