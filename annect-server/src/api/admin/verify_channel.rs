use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::channel::{Channel, ChannelVerification, GetChannelById};
use annect_core::entities::user::GetUserById;
use annect_core::events::MailEvent;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireAdmin;
use crate::state::AppState;

use super::AdminApiError;

/// `POST /channels/{channel_id}/verify` — approve a channel.
///
/// Re-verifying a verified channel is a user-visible conflict, not a
/// silent no-op. The owner gets a "channel verified" mail.
pub async fn verify_channel(
    state: axum::extract::State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(channel_id): Path<Uuid>,
) -> Result<impl IntoResponse, AdminApiError> {
    let outcome = Channel::verify(&state.db, channel_id)
        .await
        .map_err(AdminApiError::Database)?;

    match outcome {
        ChannelVerification::Verified => {}
        ChannelVerification::AlreadyVerified => return Err(AdminApiError::AlreadyVerified),
        ChannelVerification::NotFound => return Err(AdminApiError::NotFound),
    }

    let processor = DatabaseProcessor::new(state.db.clone());
    let channel = processor
        .process(GetChannelById { channel_id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;
    let owner = processor
        .process(GetUserById {
            id: channel.user_id.clone(),
        })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    state
        .event_senders
        .enqueue_mail(MailEvent::ChannelVerified {
            to: owner.email,
            name: owner.name,
        })
        .await;

    Ok(Json(serde_json::json!({ "verified": true })))
}
