use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::channel::GetChannelByOwner;
use annect_core::entities::event::{Event, GetEventById};
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

#[derive(Debug, serde::Deserialize, Default)]
pub struct ListingFeePaymentRequest {
    /// Optional gateway receipt or transfer proof reference.
    pub payment_proof: Option<String>,
}

/// `POST /events/{event_id}/payment` — record the listing fee as paid.
///
/// The client reports gateway success itself; the payment is not
/// verified against the gateway's ledger.
pub async fn pay_listing_fee(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<ListingFeePaymentRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let event = processor
        .process(GetEventById { event_id })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    let channel = processor
        .process(GetChannelByOwner {
            user_id: caller.id.clone(),
        })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::ChannelRequired)?;
    if event.channel_id != channel.id {
        return Err(UserApiError::NotOwner);
    }

    Event::mark_listing_fee_paid(&state.db, event_id, body.payment_proof)
        .await
        .map_err(UserApiError::Database)?;

    Ok(Json(serde_json::json!({ "listing_fee_paid": true })))
}
