use axum::{Json, extract::Path, response::IntoResponse};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use annect_core::entities::event::GetEventById;
use annect_core::entities::membership::{GetMembership, Membership};
use annect_core::events::MailEvent;
use annect_core::framework::DatabaseProcessor;

use crate::api::extractors::{Caller, RequireUser};
use crate::state::AppState;

use super::UserApiError;

/// `POST /events/{event_id}/join` — join an event.
///
/// Free events confirm immediately and send the group link; paid events
/// create an awaiting-payment membership and the client proceeds through
/// the gateway. A pre-existing membership is an idempotent success with
/// no second mail.
pub async fn join_event(
    state: axum::extract::State<AppState>,
    RequireUser(caller): RequireUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, UserApiError> {
    let outcome = perform_join(&state, &caller, event_id).await?;
    Ok(Json(serde_json::json!({
        "joined": true,
        "confirmed": outcome.confirmed,
    })))
}

pub(super) struct JoinOutcome {
    /// False while a paid join awaits its payment confirmation.
    pub confirmed: bool,
}

/// Shared between the join endpoint and the gateway handoff, which also
/// joins when creating a `user_event` transaction.
pub(super) async fn perform_join(
    state: &AppState,
    caller: &Caller,
    event_id: Uuid,
) -> Result<JoinOutcome, UserApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let event = processor
        .process(GetEventById { event_id })
        .await
        .map_err(UserApiError::Database)?
        .ok_or(UserApiError::NotFound)?;

    let free = event.price <= Decimal::ZERO;

    let membership = Membership::join(&state.db, &caller.id, event_id, free)
        .await
        .map_err(UserApiError::Database)?;

    let Some(membership) = membership else {
        // Already a member; nothing changed and no mail fires.
        let existing = processor
            .process(GetMembership {
                user_id: caller.id.clone(),
                event_id,
            })
            .await
            .map_err(UserApiError::Database)?;
        return Ok(JoinOutcome {
            confirmed: existing.map(|m| m.status).unwrap_or(false),
        });
    };

    let mail = if free {
        MailEvent::PaymentDone {
            to: caller.email.clone(),
            name: caller.display_name.clone(),
            link_group: event.link_group.clone(),
        }
    } else {
        MailEvent::JoinPending {
            to: caller.email.clone(),
            name: caller.display_name.clone(),
            price: event.price,
        }
    };
    state.event_senders.enqueue_mail(mail).await;

    Ok(JoinOutcome {
        confirmed: membership.status,
    })
}
