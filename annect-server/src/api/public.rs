//! Public browse endpoints.
//!
//! Anonymous-friendly: the optional caller identity only drives the
//! `is_favorite` / `is_followed` annotations.
//!
//! # Endpoints
//!
//! - `GET /api/events`         – ongoing events, filterable
//! - `GET /api/events/{id}`    – event detail
//! - `GET /api/channels`       – channels, name-filterable
//! - `GET /api/channels/{id}`  – channel detail with its ongoing events
//! - `GET /api/tags`           – tag list for the filter UI
//! - `GET /api/categories`     – category list for the filter UI

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use kanau::processor::Processor;

use annect_core::entities::channel::{ChannelListed, GetChannelListed, ListChannels};
use annect_core::entities::event::{GetEventDetail, ListChannelEvents, ListPublicEvents};
use annect_core::entities::taxonomy::{ListCategories, ListTags};
use annect_core::framework::DatabaseProcessor;
use uuid::Uuid;

use crate::api::extractors::Identity;
use crate::state::AppState;

/// Build the public router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/{event_id}", get(get_event))
        .route("/api/channels", get(list_channels))
        .route("/api/channels/{channel_id}", get(get_channel))
        .route("/api/tags", get(list_tags))
        .route("/api/categories", get(list_categories))
}

/// Comma-separated filter parameters from the listing query string.
#[derive(Debug, serde::Deserialize, Default)]
pub struct EventFilterParams {
    pub name: Option<String>,
    /// Comma-separated tag ids.
    pub tags: Option<String>,
    /// Comma-separated category ids.
    pub categories: Option<String>,
    /// Comma-separated selection of `PAID` / `UNPAID`.
    pub price: Option<String>,
}

/// Split a comma-separated id list, ignoring anything unparseable.
fn parse_id_set(raw: Option<&str>) -> Vec<Uuid> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|part| Uuid::parse_str(part.trim()).ok())
            .collect()
    })
    .unwrap_or_default()
}

/// Reduce the PAID/UNPAID multi-select to a filter.
///
/// Only a selection of exactly one side filters anything; selecting both
/// (or neither) means "show everything", matching the filter UI semantics.
fn parse_paid_filter(raw: Option<&str>) -> Option<bool> {
    let selected: Vec<bool> = raw?
        .split(',')
        .filter_map(|part| match part.trim() {
            "PAID" => Some(true),
            "UNPAID" => Some(false),
            _ => None,
        })
        .collect();
    match selected.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// `GET /api/events` — public ongoing-event listing.
async fn list_events(
    state: State<AppState>,
    Identity(caller): Identity,
    Query(params): Query<EventFilterParams>,
) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let events = processor
        .process(ListPublicEvents {
            name: params.name.filter(|n| !n.is_empty()),
            tag_ids: parse_id_set(params.tags.as_deref()),
            category_ids: parse_id_set(params.categories.as_deref()),
            is_paid: parse_paid_filter(params.price.as_deref()),
            viewer: caller.map(|c| c.id),
        })
        .await
        .map_err(PublicApiError::Database)?;

    Ok(Json(events))
}

/// `GET /api/events/{event_id}` — event detail with favorite annotation.
async fn get_event(
    state: State<AppState>,
    Identity(caller): Identity,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let event = processor
        .process(GetEventDetail {
            event_id,
            viewer: caller.map(|c| c.id),
        })
        .await
        .map_err(PublicApiError::Database)?
        .ok_or(PublicApiError::NotFound)?;

    Ok(Json(event))
}

#[derive(Debug, serde::Deserialize, Default)]
pub struct ChannelFilterParams {
    pub name: Option<String>,
}

/// `GET /api/channels` — channel listing with follower annotations.
async fn list_channels(
    state: State<AppState>,
    Identity(caller): Identity,
    Query(params): Query<ChannelFilterParams>,
) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());

    let channels = processor
        .process(ListChannels {
            name: params.name.filter(|n| !n.is_empty()),
            viewer: caller.map(|c| c.id),
        })
        .await
        .map_err(PublicApiError::Database)?;

    Ok(Json(channels))
}

/// Channel detail: the profile plus its ongoing events.
#[derive(serde::Serialize)]
struct ChannelDetail {
    channel: ChannelListed,
    events: Vec<annect_core::entities::event::EventListed>,
}

/// `GET /api/channels/{channel_id}` — channel detail page payload.
async fn get_channel(
    state: State<AppState>,
    Identity(caller): Identity,
    Path(channel_id): Path<Uuid>,
) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());
    let viewer = caller.map(|c| c.id);

    let listed = processor
        .process(GetChannelListed {
            channel_id,
            viewer: viewer.clone(),
        })
        .await
        .map_err(PublicApiError::Database)?
        .ok_or(PublicApiError::NotFound)?;

    let events = processor
        .process(ListChannelEvents { channel_id, viewer })
        .await
        .map_err(PublicApiError::Database)?;

    Ok(Json(ChannelDetail {
        channel: listed,
        events,
    }))
}

/// `GET /api/tags`
async fn list_tags(state: State<AppState>) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());
    let tags = processor
        .process(ListTags)
        .await
        .map_err(PublicApiError::Database)?;
    Ok(Json(tags))
}

/// `GET /api/categories`
async fn list_categories(state: State<AppState>) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor::new(state.db.clone());
    let categories = processor
        .process(ListCategories)
        .await
        .map_err(PublicApiError::Database)?;
    Ok(Json(categories))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in public handlers.
#[derive(Debug)]
enum PublicApiError {
    Database(sqlx::Error),
    NotFound,
}

impl IntoResponse for PublicApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PublicApiError::Database(e) => {
                tracing::error!(error = %e, "Public API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            PublicApiError::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_filter_applies_only_on_single_selection() {
        assert_eq!(parse_paid_filter(Some("PAID")), Some(true));
        assert_eq!(parse_paid_filter(Some("UNPAID")), Some(false));
        assert_eq!(parse_paid_filter(Some("PAID,UNPAID")), None);
        assert_eq!(parse_paid_filter(Some("")), None);
        assert_eq!(parse_paid_filter(None), None);
        assert_eq!(parse_paid_filter(Some("garbage")), None);
    }

    #[test]
    fn id_set_skips_invalid_entries() {
        let id = Uuid::new_v4();
        let raw = format!("{id}, not-a-uuid");
        assert_eq!(parse_id_set(Some(&raw)), vec![id]);
        assert!(parse_id_set(None).is_empty());
    }
}
