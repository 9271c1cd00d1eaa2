use axum::{Json, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use annect_core::entities::channel::GetChannelByOwner;
use annect_core::entities::event::{Event, EventInsert};
use annect_core::events::MailEvent;
use annect_core::framework::DatabaseProcessor;
use annect_core::pricing;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

#[derive(Debug, serde::Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location: String,
    pub link_group: String,
    pub event_date: time::PrimitiveDateTime,
    pub tag_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub price: Decimal,
    pub is_paid: bool,
    /// Days of public visibility; drives the listing fee.
    pub post_duration: i32,
}

#[derive(serde::Serialize)]
struct CreateEventResponse {
    event: Event,
    /// Listing fee due before the event can go live.
    total_fee: Decimal,
}

/// `POST /events` — create an event under the caller's channel.
///
/// The event starts `pending` with the listing fee unpaid. The organizer
/// gets a fee-due mail; every follower of the channel gets a broadcast.
pub async fn create_event(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Json(body): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let channel = processor
        .process(GetChannelByOwner {
            user_id: caller.id.clone(),
        })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::ChannelRequired)?;

    let pricing = pricing::normalize_pricing(body.is_paid, body.price)
        .map_err(UserApiError::InvalidPricing)?;

    let rate = state.config.billing.read().await.listing_fee_per_day;
    let total_fee =
        pricing::listing_fee(rate, body.post_duration).map_err(UserApiError::InvalidPricing)?;

    let event = Event::create(
        &state.db,
        EventInsert {
            channel_id: channel.id,
            tag_id: body.tag_id,
            category_id: body.category_id,
            name: body.name,
            description: body.description,
            image: body.image,
            location: body.location,
            link_group: body.link_group,
            event_date: body.event_date,
            price: pricing.price,
            is_paid: pricing.is_paid,
            post_duration: body.post_duration,
        },
    )
    .await
    .map_err(UserApiError::Database)?;

    state
        .event_senders
        .enqueue_mail(MailEvent::EventCreated {
            to: caller.email,
            name: caller.display_name,
            total_fee,
        })
        .await;

    state
        .event_senders
        .enqueue_mail(MailEvent::Broadcast {
            channel_id: channel.id,
        })
        .await;

    Ok((StatusCode::CREATED, Json(CreateEventResponse { event, total_fee })))
}
