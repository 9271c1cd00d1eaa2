use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;
use rust_decimal::Decimal;

use annect_core::entities::UserRole;
use annect_core::entities::channel::CountChannels;
use annect_core::entities::event::{CountEvents, SumPaidPostDurations};
use annect_core::entities::membership::{ListRecentTransactions, RecentTransaction};
use annect_core::entities::taxonomy::{CountEventsPerTag, TagCount};
use annect_core::entities::user::CountUsersWithRole;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

const RECENT_TRANSACTION_LIMIT: i64 = 5;

#[derive(serde::Serialize)]
struct DashboardResponse {
    total_channels: i64,
    total_users: i64,
    total_events: i64,
    /// Listing-fee revenue over paid events, at the current rate.
    total_revenue: Decimal,
    recent_transactions: Vec<RecentTransaction>,
    events_per_tag: Vec<TagCount>,
}

/// `GET /dashboard` — platform totals for the admin landing page.
pub async fn dashboard(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let total_channels = processor
        .process(CountChannels)
        .await
        .map_err(AdminApiError::Database)?;
    let total_users = processor
        .process(CountUsersWithRole {
            role: UserRole::User,
        })
        .await
        .map_err(AdminApiError::Database)?;
    let total_events = processor
        .process(CountEvents)
        .await
        .map_err(AdminApiError::Database)?;

    let paid_days = processor
        .process(SumPaidPostDurations)
        .await
        .map_err(AdminApiError::Database)?;
    let rate = state.config.billing.read().await.listing_fee_per_day;
    let total_revenue = rate * Decimal::from(paid_days);

    let recent_transactions = processor
        .process(ListRecentTransactions {
            limit: RECENT_TRANSACTION_LIMIT,
        })
        .await
        .map_err(AdminApiError::Database)?;

    let events_per_tag = processor
        .process(CountEventsPerTag)
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(DashboardResponse {
        total_channels,
        total_users,
        total_events,
        total_revenue,
        recent_transactions,
        events_per_tag,
    }))
}
