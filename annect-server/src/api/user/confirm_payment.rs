use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use uuid::Uuid;

use annect_core::entities::event::GetEventById;
use annect_core::entities::membership::Membership;
use annect_core::events::MailEvent;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::RequireUser;
use crate::state::AppState;

use super::UserApiError;

#[derive(Debug, serde::Deserialize, Default)]
pub struct ConfirmPaymentRequest {
    /// Optional transfer proof image reference.
    pub tf_image: Option<String>,
}

/// `POST /events/{event_id}/payment-done` — flip the caller's membership
/// to confirmed after the client reports gateway success.
///
/// The conditional update means a repeat call finds no unpaid row and
/// returns `{"confirmed": false}` without a second mail. There is no
/// server-side verification against the gateway (the client is trusted).
pub async fn confirm_payment(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<ConfirmPaymentRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let confirmed = Membership::confirm_payment(&state.db, &caller.id, event_id, body.tf_image)
        .await
        .map_err(UserApiError::Database)?;

    let Some(_membership) = confirmed else {
        // No unpaid membership for the pair; recoverable no-op.
        return Ok(Json(serde_json::json!({ "confirmed": false })));
    };

    let processor = DatabaseProcessor::new(state.db.clone());
    let event = processor
        .process(GetEventById { event_id })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    state
        .event_senders
        .enqueue_mail(MailEvent::PaymentDone {
            to: caller.email,
            name: caller.display_name,
            link_group: event.link_group,
        })
        .await;

    Ok(Json(serde_json::json!({ "confirmed": true })))
}
