use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use annect_core::entities::event::GetEventById;
use annect_core::framework::DatabaseProcessor;
use annect_core::payment::{CustomerDetails, new_order_id};
use annect_core::pricing;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;
use super::join_event::perform_join;

/// What the transaction pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Organizer's listing fee for an event.
    ListingFee,
    /// A member's ticket for a paid event.
    UserEvent,
}

#[derive(Debug, serde::Deserialize)]
pub struct CreateTransactionRequest {
    pub event_id: Uuid,
    pub payment_type: PaymentType,
}

/// `POST /api/transactions` — hand the payment off to the Snap gateway.
///
/// Returns the gateway's `{token, redirect_url}` pair for the client to
/// open. Each attempt gets a fresh order id that is not persisted or
/// reconciled afterwards. A `user_event` transaction also joins the
/// event, so the awaiting-payment membership exists before the client
/// reaches the gateway.
pub async fn create_transaction(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let event = processor
        .process(GetEventById {
            event_id: body.event_id,
        })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    let gross_amount = match body.payment_type {
        PaymentType::ListingFee => {
            let rate = state.config.billing.read().await.listing_fee_per_day;
            pricing::listing_fee(rate, event.post_duration).map_err(UserApiError::InvalidPricing)?
        }
        PaymentType::UserEvent => {
            if event.price <= Decimal::ZERO {
                // Free events never reach the gateway.
                return Err(UserApiError::FreeEvent);
            }
            perform_join(&state, &caller, body.event_id).await?;
            event.price
        }
    };

    let gateway_config = state.config.gateway.read().await.clone();
    let token = state
        .gateway
        .create_transaction(
            &gateway_config,
            new_order_id(),
            gross_amount,
            CustomerDetails {
                first_name: caller.display_name,
                email: caller.email,
            },
        )
        .await
        .map_err(UserApiError::Gateway)?;

    Ok(Json(token))
}
