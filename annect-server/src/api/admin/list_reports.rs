use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;

use annect_core::entities::report::ListReports;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

/// `GET /reports` — submitted reports, newest first.
pub async fn list_reports(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let reports = processor
        .process(ListReports)
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(reports))
}
