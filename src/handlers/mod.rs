pub mod admin;
pub mod auth;
pub mod bookings;
pub mod chatbot;
pub mod events;
pub mod health;

use crate::error::{Error, Result};
use crate::state::AppState;
use sqlx::Postgres;
use sqlx::pool::PoolConnection;
use uuid::Uuid;

/// Acquires a database connection from the pool.
pub(crate) async fn acquire(state: &AppState) -> Result<PoolConnection<Postgres>> {
    state
        .pool
        .acquire()
        .await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))
}

/// Parses an event id path segment. Ids that are not valid UUIDs cannot
/// reference any event, so they report not-found rather than a validation
/// error.
pub(crate) fn parse_event_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound("Event not found".to_string()))
}

/// Parses a booking id path segment; unknown shapes report not-found.
pub(crate) fn parse_booking_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound("Booking not found".to_string()))
}
