use axum::{Json, response::IntoResponse};

use annect_core::entities::UserRole;
use annect_core::entities::user::{User, UserInsert};
use annect_core::events::MailEvent;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

/// `POST /provision` — mirror the identity provider's account into the
/// database. Idempotent: repeat calls leave the existing row untouched
/// and send nothing.
pub async fn provision(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
) -> Result<impl IntoResponse, UserApiError> {
    let created = User::provision(
        &state.db,
        UserInsert {
            id: caller.id.clone(),
            name: caller.display_name.clone(),
            email: caller.email.clone(),
            image: None,
            role: caller.role,
        },
    )
    .await
    .map_err(UserApiError::Database)?;

    // Welcome mail only on the first sign-in of a regular account.
    if let Some(user) = &created
        && user.role == UserRole::User
    {
        state
            .event_senders
            .enqueue_mail(MailEvent::Welcome {
                to: user.email.clone(),
                name: user.name.clone(),
            })
            .await;
    }

    Ok(Json(serde_json::json!({
        "provisioned": created.is_some(),
    })))
}
