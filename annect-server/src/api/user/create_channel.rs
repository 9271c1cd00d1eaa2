use axum::{Json, http::StatusCode, response::IntoResponse};

use annect_core::entities::channel::{Channel, ChannelInsert};
use annect_core::events::MailEvent;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

#[derive(Debug, serde::Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    /// Identity document for the verification review.
    pub id_card_image: Option<String>,
}

/// `POST /channels` — create the caller's organizer channel.
///
/// One channel per account; a second attempt conflicts. The channel
/// starts `unverified` and waits for admin review.
pub async fn create_channel(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Json(body): Json<CreateChannelRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let channel = Channel::create(
        &state.db,
        ChannelInsert {
            user_id: caller.id.clone(),
            name: body.name,
            description: body.description,
            image: body.image,
            id_card_image: body.id_card_image,
        },
    )
    .await
    .map_err(UserApiError::Database)?
    .ok_or(UserApiError::ChannelExists)?;

    state
        .event_senders
        .enqueue_mail(MailEvent::ChannelCreated {
            to: caller.email,
            name: caller.display_name,
        })
        .await;

    Ok((StatusCode::CREATED, Json(channel)))
}
