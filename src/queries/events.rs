use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::events::{Event, EventWithCount, NewEvent},
};

/// Creates a new event.
pub async fn create_event(conn: &mut DbConn, new_event: NewEvent) -> Result<Event> {
    let event = sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (id, name, description, date, venue, capacity, category, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, description, date, venue, capacity, category, created_at, created_by
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&new_event.name)
    .bind(&new_event.description)
    .bind(new_event.date)
    .bind(&new_event.venue)
    .bind(new_event.capacity)
    .bind(&new_event.category)
    .bind(&new_event.created_by)
    .fetch_one(conn)
    .await?;

    Ok(event)
}

/// Gets a single event by its ID. The event may not exist.
pub async fn get_event_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, description, date, venue, capacity, category, created_at, created_by
        FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(event)
}

/// Lists all events ordered by date ascending.
pub async fn list_events(conn: &mut DbConn) -> Result<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, description, date, venue, capacity, category, created_at, created_by
        FROM events
        ORDER BY date ASC
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(events)
}

/// Lists all events with their registration counts, ordered by date.
///
/// One joined query instead of a per-event count round trip.
pub async fn list_events_with_counts(conn: &mut DbConn) -> Result<Vec<EventWithCount>> {
    let events = sqlx::query_as::<_, EventWithCount>(
        r#"
        SELECT e.id, e.name, e.description, e.date, e.venue, e.capacity, e.category,
               e.created_at, e.created_by,
               COUNT(r.id) AS registration_count
        FROM events e
        LEFT JOIN registrations r ON r.event_id = e.id
        GROUP BY e.id
        ORDER BY e.date ASC
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(events)
}

/// Deletes an event by its ID, returning the number of rows removed.
pub async fn delete_event(conn: &mut DbConn, id: Uuid) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?
    .rows_affected();

    Ok(rows_affected)
}
