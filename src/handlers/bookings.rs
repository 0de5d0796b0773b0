//! Booking handlers: registration, cancellation, and lookups.
//!
//! Handlers follow the thin-layer pattern: they validate inputs, delegate
//! to services, and return responses.

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
};

use crate::{
    error::Result,
    models::requests::{BookEventRequest, CancelBookingRequest},
    services::registrations::{self, BookingInput},
    state::AppState,
};

/// POST /api/events/{event_id}/book
///
/// Registers a name/email/phone for an event.
///
/// # HTTP Status Codes
/// - `201 CREATED`: Booking created, body carries the confirmation
/// - `400 BAD_REQUEST`: Invalid name or email, or the event date has passed
/// - `404 NOT_FOUND`: Event does not exist
/// - `409 CONFLICT`: This email already registered for the event; the
///   existing booking is attached as `existingBooking`
pub async fn book_event(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(event_id): Path<String>,
    Json(request): Json<BookEventRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let event_id = super::parse_event_id(&event_id)?;
    let mut conn = super::acquire(&state).await?;

    let booking = registrations::create_booking(
        &mut conn,
        event_id,
        BookingInput {
            name: request.name,
            email: request.email,
            phone: request.phone,
            ip_address: Some(addr.ip().to_string()),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Event registration successful!",
            "booking": booking,
        })),
    ))
}

/// GET /api/events/{event_id}/bookings
///
/// Lists bookings for one event, newest first.
pub async fn list_event_bookings(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let event_id = super::parse_event_id(&event_id)?;
    let mut conn = super::acquire(&state).await?;

    let bookings = registrations::list_bookings_for_event(&mut conn, event_id).await?;

    Ok(Json(serde_json::json!({
        "eventId": event_id,
        "totalBookings": bookings.len(),
        "bookings": bookings,
    })))
}

/// GET /api/bookings/{email}
///
/// Lists bookings made with one email, newest first.
///
/// # HTTP Status Codes
/// - `200 OK`: List returned (possibly empty)
/// - `400 BAD_REQUEST`: Email does not have a valid shape
pub async fn list_bookings_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = super::acquire(&state).await?;

    let bookings = registrations::list_bookings_for_email(&mut conn, &email).await?;

    Ok(Json(serde_json::json!({
        "userEmail": email.to_lowercase(),
        "totalBookings": bookings.len(),
        "bookings": bookings,
    })))
}

/// DELETE /api/bookings/cancel/{booking_id}
///
/// Cancels a booking. The request body must carry the email the booking
/// was made with; a mismatch reports not-found.
///
/// # HTTP Status Codes
/// - `200 OK`: Booking cancelled
/// - `400 BAD_REQUEST`: Missing email
/// - `404 NOT_FOUND`: No booking with this id and email
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    body: Option<Json<CancelBookingRequest>>,
) -> Result<Json<serde_json::Value>> {
    let booking_id = super::parse_booking_id(&booking_id)?;
    let mut conn = super::acquire(&state).await?;

    // A missing body is the same as a body without an email.
    let email = body.and_then(|Json(request)| request.email);
    registrations::cancel_booking(&mut conn, booking_id, email.as_deref()).await?;

    Ok(Json(serde_json::json!({
        "message": "Booking cancelled successfully",
        "bookingId": booking_id,
    })))
}
