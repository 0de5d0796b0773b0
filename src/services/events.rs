//! Admin event management: creation and transactional cascade delete.

use chrono::NaiveDate;
use sqlx::Acquire;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::{
        events::{Event, NewEvent},
        requests::CreateEventRequest,
    },
    queries::{events, registrations},
};

const DEFAULT_CAPACITY: i32 = 100;

/// Creates an event. Name, date and venue are required; capacity defaults
/// to 100.
pub async fn create_event(conn: &mut DbConn, request: CreateEventRequest) -> Result<Event> {
    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let venue = request
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let (Some(name), Some(date), Some(venue)) = (name, request.date.as_deref(), venue) else {
        return Err(Error::Validation(
            "Name, date, and venue are required".to_string(),
        ));
    };

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Validation("Date must be in YYYY-MM-DD format".to_string()))?;

    let new_event = NewEvent {
        name: name.to_string(),
        description: request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        date,
        venue: venue.to_string(),
        capacity: request.capacity.unwrap_or(DEFAULT_CAPACITY),
        category: request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        created_by: "admin".to_string(),
    };

    let event = events::create_event(conn, new_event).await?;
    tracing::info!(event_id = %event.id, name = %event.name, "event created");
    Ok(event)
}

/// Deletes an event together with all registrations that reference it.
///
/// Runs in a single transaction: either the event and every dependent
/// registration are gone, or nothing is. Returns the number of
/// registrations removed.
pub async fn delete_event_cascade(conn: &mut DbConn, event_id: Uuid) -> Result<u64> {
    let mut tx = conn.begin().await?;

    let deleted_registrations =
        registrations::delete_registrations_for_event(&mut tx, event_id).await?;
    let deleted_events = events::delete_event(&mut tx, event_id).await?;
    if deleted_events == 0 {
        // Transaction rolls back on drop.
        return Err(Error::NotFound("Event not found".to_string()));
    }

    tx.commit().await?;
    tracing::info!(%event_id, deleted_registrations, "event deleted with registrations");
    Ok(deleted_registrations)
}
