use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::registrations::{NewRegistration, Registration, SOURCE_WEB, STATUS_CONFIRMED},
};

const REGISTRATION_COLUMNS: &str = "id, event_id, event_name, event_date, event_venue, \
     user_name, user_email, user_phone, booking_date, status, registration_source, ip_address";

/// Inserts a registration, returning `None` when a registration for the
/// same (event_id, user_email) pair already exists.
///
/// The uniqueness constraint makes this a single atomic step; two
/// concurrent bookings for the same pair cannot both succeed.
pub async fn create_registration(
    conn: &mut DbConn,
    new_registration: NewRegistration,
) -> Result<Option<Registration>> {
    let registration = sqlx::query_as::<_, Registration>(&format!(
        r#"
        INSERT INTO registrations
            (id, event_id, event_name, event_date, event_venue,
             user_name, user_email, user_phone, status, registration_source, ip_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT ON CONSTRAINT registrations_event_email_key DO NOTHING
        RETURNING {REGISTRATION_COLUMNS}
        "#
    ))
    .bind(Uuid::now_v7())
    .bind(new_registration.event_id)
    .bind(&new_registration.event_name)
    .bind(new_registration.event_date)
    .bind(&new_registration.event_venue)
    .bind(&new_registration.user_name)
    .bind(&new_registration.user_email)
    .bind(&new_registration.user_phone)
    .bind(STATUS_CONFIRMED)
    .bind(SOURCE_WEB)
    .bind(&new_registration.ip_address)
    .fetch_optional(conn)
    .await?;

    Ok(registration)
}

/// Gets the registration for an (event, email) pair, if any.
pub async fn get_registration_for_event_and_email(
    conn: &mut DbConn,
    event_id: Uuid,
    email: &str,
) -> Result<Option<Registration>> {
    let registration = sqlx::query_as::<_, Registration>(&format!(
        r#"
        SELECT {REGISTRATION_COLUMNS}
        FROM registrations
        WHERE event_id = $1 AND user_email = $2
        "#
    ))
    .bind(event_id)
    .bind(email)
    .fetch_optional(conn)
    .await?;

    Ok(registration)
}

/// Lists registrations for one event, newest first.
pub async fn list_registrations_for_event(
    conn: &mut DbConn,
    event_id: Uuid,
) -> Result<Vec<Registration>> {
    let registrations = sqlx::query_as::<_, Registration>(&format!(
        r#"
        SELECT {REGISTRATION_COLUMNS}
        FROM registrations
        WHERE event_id = $1
        ORDER BY booking_date DESC
        "#
    ))
    .bind(event_id)
    .fetch_all(conn)
    .await?;

    Ok(registrations)
}

/// Lists registrations for one email, newest first.
pub async fn list_registrations_for_email(
    conn: &mut DbConn,
    email: &str,
) -> Result<Vec<Registration>> {
    let registrations = sqlx::query_as::<_, Registration>(&format!(
        r#"
        SELECT {REGISTRATION_COLUMNS}
        FROM registrations
        WHERE user_email = $1
        ORDER BY booking_date DESC
        "#
    ))
    .bind(email)
    .fetch_all(conn)
    .await?;

    Ok(registrations)
}

/// Lists all registrations, newest first.
pub async fn list_registrations(conn: &mut DbConn) -> Result<Vec<Registration>> {
    let registrations = sqlx::query_as::<_, Registration>(&format!(
        r#"
        SELECT {REGISTRATION_COLUMNS}
        FROM registrations
        ORDER BY booking_date DESC
        "#
    ))
    .fetch_all(conn)
    .await?;

    Ok(registrations)
}

/// Deletes a registration by id, additionally constrained to the supplied
/// email. Returns the number of rows removed; zero means no registration
/// matched both the id and the email.
pub async fn delete_registration_for_email(
    conn: &mut DbConn,
    id: Uuid,
    email: &str,
) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM registrations
        WHERE id = $1 AND user_email = $2
        "#,
    )
    .bind(id)
    .bind(email)
    .execute(conn)
    .await?
    .rows_affected();

    Ok(rows_affected)
}

/// Deletes every registration referencing an event, returning the count.
pub async fn delete_registrations_for_event(conn: &mut DbConn, event_id: Uuid) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM registrations
        WHERE event_id = $1
        "#,
    )
    .bind(event_id)
    .execute(conn)
    .await?
    .rows_affected();

    Ok(rows_affected)
}
