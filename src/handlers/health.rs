use axum::{Json, extract::State};
use chrono::Utc;

use crate::{error::Result, state::AppState};

/// GET /
///
/// Health check: verifies database connectivity and reports collection
/// totals.
pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let mut conn = super::acquire(&state).await?;

    let total_events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(&mut *conn)
        .await?;
    let total_bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
        .fetch_one(&mut *conn)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Campus Events API is running",
        "timestamp": Utc::now(),
        "totalEvents": total_events,
        "totalBookings": total_bookings,
        "features": ["Event Management", "Booking System", "AI Chatbot", "Admin Panel"],
    })))
}
