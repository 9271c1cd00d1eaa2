use axum::{Json, extract::Path, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::channel::GetChannelByOwner;
use annect_core::entities::event::GetEventById;
use annect_core::entities::membership::CountConfirmedMembers;
use annect_core::entities::withdraw::WithdrawRequest;
use annect_core::framework::DatabaseProcessor;
use annect_core::pricing;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

/// `POST /events/{event_id}/withdraw` — request a settlement payout.
///
/// The amount is fixed at request time as confirmed members times the
/// ticket price; later confirmations do not grow it. The event being
/// `done` is the caller's precondition and is not checked here, but
/// ownership is.
pub async fn request_withdraw(
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

    let confirmed = processor
        .process(CountConfirmedMembers { event_id })
        .await
        .map_err(UserApiError::Database)?;

    let amount = pricing::withdraw_amount(confirmed, event.price);

    let request = WithdrawRequest::create(&state.db, &caller.id, event_id, amount)
        .await
        .map_err(UserApiError::Database)?;

    Ok((StatusCode::CREATED, Json(request)))
}
