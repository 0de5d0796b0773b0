//! Public event browsing handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::{Error, Result},
    models::events::Event,
    queries::events,
    state::AppState,
};

/// GET /api/events
///
/// Lists all events ordered by date ascending.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let mut conn = super::acquire(&state).await?;
    let events = events::list_events(&mut conn).await?;
    Ok(Json(events))
}

/// GET /api/events/{event_id}
///
/// Gets a single event by id.
///
/// # HTTP Status Codes
/// - `200 OK`: Event found
/// - `404 NOT_FOUND`: No event with this id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>> {
    let event_id = super::parse_event_id(&event_id)?;
    let mut conn = super::acquire(&state).await?;

    let event = events::get_event_by_id(&mut conn, event_id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}
