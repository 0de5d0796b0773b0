//! Booking workflow: registration creation, cancellation, and lookups.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::registrations::{BookingConfirmation, NewRegistration, Registration},
    queries::{events, registrations},
    validation,
};

/// Registrant details supplied with a booking request.
#[derive(Debug, Clone)]
pub struct BookingInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ip_address: Option<String>,
}

/// Creates a booking for an event.
///
/// Preconditions are checked in order, first failure wins:
/// 1. registrant name at least 2 characters after trimming;
/// 2. email has a `local@domain.tld` shape;
/// 3. the event exists;
/// 4. the event is not dated before today.
///
/// The duplicate check is not a separate read: the insert itself is
/// conditional on the (event_id, user_email) uniqueness constraint, so two
/// concurrent requests for the same pair cannot both create a registration.
/// On a duplicate the existing registration is returned inside the error.
pub async fn create_booking(
    conn: &mut DbConn,
    event_id: Uuid,
    input: BookingInput,
) -> Result<BookingConfirmation> {
    let name = validation::validate_name(input.name.as_deref().unwrap_or_default())?;
    let email = input.email.as_deref().unwrap_or_default();
    validation::validate_email(email)?;
    let email = validation::normalize_email(email);

    let event = events::get_event_by_id(conn, event_id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

    if is_closed_for_registration(event.date, Utc::now().date_naive()) {
        return Err(Error::Validation(
            "Cannot register for past events".to_string(),
        ));
    }

    let new_registration = NewRegistration {
        event_id: event.id,
        event_name: event.name,
        event_date: event.date,
        event_venue: event.venue,
        user_name: name,
        user_email: email.clone(),
        user_phone: validation::normalize_phone(input.phone.as_deref()),
        ip_address: input.ip_address,
    };

    match registrations::create_registration(conn, new_registration).await? {
        Some(registration) => {
            tracing::info!(
                booking_id = %registration.id,
                event_id = %event_id,
                email = %email,
                "booking created"
            );
            Ok(registration.into())
        }
        None => {
            // The constraint rejected the insert; surface the existing
            // registration to the caller.
            let existing =
                registrations::get_registration_for_event_and_email(conn, event_id, &email)
                    .await?
                    .ok_or_else(|| {
                        Error::Conflict("You have already registered for this event".to_string())
                    })?;
            Err(Error::DuplicateRegistration(Box::new(existing)))
        }
    }
}

/// An event is closed for registration once its date is strictly before
/// today; an event happening today still accepts bookings.
pub fn is_closed_for_registration(event_date: NaiveDate, today: NaiveDate) -> bool {
    event_date < today
}

/// Cancels a booking by id, guarded by a matching email. The email match
/// is the only authorization check on this path.
pub async fn cancel_booking(
    conn: &mut DbConn,
    booking_id: Uuid,
    email: Option<&str>,
) -> Result<()> {
    let email = email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Error::Validation("Email is required to cancel booking".to_string()))?;
    let email = validation::normalize_email(email);

    let deleted = registrations::delete_registration_for_email(conn, booking_id, &email).await?;
    if deleted == 0 {
        return Err(Error::NotFound("Booking not found".to_string()));
    }

    tracing::info!(%booking_id, %email, "booking cancelled");
    Ok(())
}

/// Lists bookings for one registrant email, newest first.
pub async fn list_bookings_for_email(conn: &mut DbConn, email: &str) -> Result<Vec<Registration>> {
    validation::validate_email(email)?;
    let email = validation::normalize_email(email);
    registrations::list_registrations_for_email(conn, &email).await
}

/// Lists bookings for one event, newest first.
pub async fn list_bookings_for_event(
    conn: &mut DbConn,
    event_id: Uuid,
) -> Result<Vec<Registration>> {
    registrations::list_registrations_for_event(conn, event_id).await
}
