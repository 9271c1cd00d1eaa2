use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use annect_core::entities::EventStatus;
use annect_core::entities::channel::GetChannelByOwner;
use annect_core::entities::event::GetEventById;
use annect_core::entities::membership::{CountConfirmedMembers, ListEventMembers, MemberListed};
use annect_core::framework::DatabaseProcessor;
use annect_core::pricing;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

#[derive(serde::Serialize)]
struct EventAnalytics {
    members: Vec<MemberListed>,
    confirmed_members: i64,
    /// Confirmed members times the ticket price.
    total_income: Decimal,
}

/// `GET /events/{event_id}/analytics` — organizer's view of one event.
///
/// Only available once the event left `pending`, and only to the channel
/// that owns it.
pub async fn event_analytics(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(event_id): Path<Uuid>,
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
    if event.status == EventStatus::Pending {
        return Err(UserApiError::NotFound);
    }

    let members = processor
        .process(ListEventMembers { event_id })
        .await
        .map_err(UserApiError::Database)?;

    let confirmed = processor
        .process(CountConfirmedMembers { event_id })
        .await
        .map_err(UserApiError::Database)?;

    Ok(Json(EventAnalytics {
        members,
        confirmed_members: confirmed,
        total_income: pricing::withdraw_amount(confirmed, event.price),
    }))
}
