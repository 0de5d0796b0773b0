//! Admin handlers: login, event CRUD, registrations listing, dashboard.
//!
//! Everything except login sits behind the admin bearer-token middleware.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    error::{Error, Result},
    models::requests::{AdminLoginRequest, CreateEventRequest, RegistrationsFilter},
    queries::{events as event_queries, registrations as registration_queries},
    services::{admin_sessions, events, reports},
    state::AppState,
};

/// POST /api/admin/login
///
/// Verifies admin credentials (from configuration) and issues a signed
/// session token for the admin routes.
///
/// # HTTP Status Codes
/// - `200 OK`: Credentials valid; body carries `token` and `expiresAt`
/// - `400 BAD_REQUEST`: Missing email or password
/// - `401 UNAUTHORIZED`: Invalid admin credentials
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<serde_json::Value>> {
    let (Some(email), Some(password)) = (request.email.as_deref(), request.password.as_deref())
    else {
        return Err(Error::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let session = admin_sessions::login_admin(&state.config.admin, email, password)?;

    Ok(Json(serde_json::json!({
        "message": "Admin login successful",
        "admin": {
            "email": session.email,
            "role": admin_sessions::ADMIN_ROLE,
        },
        "token": session.token,
        "expiresAt": session.expires_at,
    })))
}

/// POST /api/admin/events
///
/// Creates an event.
///
/// # HTTP Status Codes
/// - `201 CREATED`: Event created
/// - `400 BAD_REQUEST`: Missing name/date/venue or malformed date
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = super::acquire(&state).await?;

    let event = events::create_event(&mut conn, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Event created successfully",
            "event": event,
        })),
    ))
}

/// DELETE /api/admin/events/{event_id}
///
/// Deletes an event together with all of its registrations, in one
/// transaction.
///
/// # HTTP Status Codes
/// - `200 OK`: Event and registrations deleted; body carries the count
/// - `404 NOT_FOUND`: Event does not exist (nothing is deleted)
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let event_id = super::parse_event_id(&event_id)?;
    let mut conn = super::acquire(&state).await?;

    let deleted_registrations = events::delete_event_cascade(&mut conn, event_id).await?;

    Ok(Json(serde_json::json!({
        "message": "Event and all registrations deleted successfully",
        "eventId": event_id,
        "deletedRegistrations": deleted_registrations,
    })))
}

/// GET /api/admin/events
///
/// Lists all events with their registration counts, ordered by date.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let mut conn = super::acquire(&state).await?;

    let events = event_queries::list_events_with_counts(&mut conn).await?;

    Ok(Json(serde_json::json!({
        "totalEvents": events.len(),
        "events": events,
    })))
}

/// GET /api/admin/registrations?eventId=...
///
/// Lists registrations, optionally filtered to one event, newest first.
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(filter): Query<RegistrationsFilter>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = super::acquire(&state).await?;

    let registrations = match filter.event_id {
        Some(event_id) => {
            registration_queries::list_registrations_for_event(&mut conn, event_id).await?
        }
        None => registration_queries::list_registrations(&mut conn).await?,
    };

    Ok(Json(serde_json::json!({
        "totalRegistrations": registrations.len(),
        "eventId": filter.event_id.map_or_else(|| "all".to_string(), |id| id.to_string()),
        "registrations": registrations,
    })))
}

/// GET /api/admin/dashboard
///
/// Dashboard summary: totals, upcoming events, trailing-7-day
/// registrations, and the per-event average rounded to one decimal.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<reports::DashboardStats>> {
    let mut conn = super::acquire(&state).await?;
    let stats = reports::dashboard_stats(&mut conn).await?;
    Ok(Json(stats))
}
