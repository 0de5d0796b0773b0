//! Service-level tests for the booking workflow, cascade delete, and
//! dashboard figures, against a migrated Postgres database.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use campus_events::{
    error::Error,
    models::{events::Event, requests::CreateEventRequest},
    queries,
    services::{
        events::{create_event, delete_event_cascade},
        registrations::{BookingInput, cancel_booking, create_booking, list_bookings_for_event},
        reports::dashboard_stats,
    },
};

fn event_request(name: &str, date: &str) -> CreateEventRequest {
    CreateEventRequest {
        name: Some(name.to_string()),
        description: None,
        date: Some(date.to_string()),
        venue: Some("Main Hall".to_string()),
        capacity: None,
        category: Some("Tech".to_string()),
    }
}

fn booking_input(name: &str, email: &str) -> BookingInput {
    BookingInput {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        phone: None,
        ip_address: Some("127.0.0.1".to_string()),
    }
}

async fn upcoming_event(pool: &PgPool, name: &str) -> Event {
    let mut conn = pool.acquire().await.unwrap();
    let date = (Utc::now().date_naive() + Duration::days(30))
        .format("%Y-%m-%d")
        .to_string();
    create_event(&mut conn, event_request(name, &date))
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_duplicate_booking_rejected_with_existing_record(pool: PgPool) {
    let event = upcoming_event(&pool, "Tech Fest").await;
    let mut conn = pool.acquire().await.unwrap();

    let first = create_booking(&mut conn, event.id, booking_input("Jo Lee", "JO@X.com"))
        .await
        .unwrap();
    assert_eq!(first.user_email, "jo@x.com", "Email should be normalized");

    // Same pair again, different case: the constraint must reject it and
    // the error must carry the original booking.
    let second = create_booking(&mut conn, event.id, booking_input("Jo Lee", "jo@x.com")).await;
    match second {
        Err(Error::DuplicateRegistration(existing)) => {
            assert_eq!(existing.id, first.id, "Error should carry the first booking");
            assert_eq!(existing.user_email, "jo@x.com");
        }
        other => panic!("Expected DuplicateRegistration, got {other:?}"),
    }

    let bookings = list_bookings_for_event(&mut conn, event.id).await.unwrap();
    assert_eq!(bookings.len(), 1, "Only one registration should exist");
}

#[sqlx::test]
async fn test_booking_rejected_for_past_event(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let yesterday = (Utc::now().date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let event = create_event(&mut conn, event_request("Old Fest", &yesterday))
        .await
        .unwrap();

    let result = create_booking(&mut conn, event.id, booking_input("Jo Lee", "jo@x.com")).await;
    match result {
        Err(Error::Validation(msg)) => {
            assert_eq!(msg, "Cannot register for past events");
        }
        other => panic!("Expected Validation, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_booking_unknown_event_is_not_found(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();

    let result = create_booking(
        &mut conn,
        Uuid::now_v7(),
        booking_input("Jo Lee", "jo@x.com"),
    )
    .await;
    assert!(
        matches!(result, Err(Error::NotFound(_))),
        "Unknown event should report not-found, got {result:?}"
    );
}

#[sqlx::test]
async fn test_cancel_requires_matching_email(pool: PgPool) {
    let event = upcoming_event(&pool, "Tech Fest").await;
    let mut conn = pool.acquire().await.unwrap();

    let booking = create_booking(&mut conn, event.id, booking_input("Jo Lee", "jo@x.com"))
        .await
        .unwrap();

    // Missing email is a validation failure, not a lookup miss.
    let missing = cancel_booking(&mut conn, booking.id, None).await;
    assert!(matches!(missing, Err(Error::Validation(_))));

    // A different email must not be able to cancel the booking.
    let mismatch = cancel_booking(&mut conn, booking.id, Some("other@x.com")).await;
    assert!(
        matches!(mismatch, Err(Error::NotFound(_))),
        "Mismatched email should report not-found, got {mismatch:?}"
    );
    let bookings = list_bookings_for_event(&mut conn, event.id).await.unwrap();
    assert_eq!(bookings.len(), 1, "Booking should survive the mismatch");

    // The matching email cancels it, case-insensitively.
    cancel_booking(&mut conn, booking.id, Some("JO@X.com"))
        .await
        .unwrap();
    let bookings = list_bookings_for_event(&mut conn, event.id).await.unwrap();
    assert!(bookings.is_empty(), "Booking should be gone after cancel");
}

#[sqlx::test]
async fn test_cascade_delete_removes_event_and_registrations(pool: PgPool) {
    let event = upcoming_event(&pool, "Tech Fest").await;
    let mut conn = pool.acquire().await.unwrap();

    for i in 0..3 {
        create_booking(
            &mut conn,
            event.id,
            booking_input("Jo Lee", &format!("jo{i}@x.com")),
        )
        .await
        .unwrap();
    }

    let removed = delete_event_cascade(&mut conn, event.id).await.unwrap();
    assert_eq!(removed, 3, "All three registrations should be counted");

    let remaining = queries::events::get_event_by_id(&mut conn, event.id)
        .await
        .unwrap();
    assert!(remaining.is_none(), "Event should be gone");
    let bookings = list_bookings_for_event(&mut conn, event.id).await.unwrap();
    assert!(bookings.is_empty(), "No registrations should remain");

    // Deleting again must report not-found without touching anything.
    let again = delete_event_cascade(&mut conn, event.id).await;
    assert!(matches!(again, Err(Error::NotFound(_))));
}

#[sqlx::test]
async fn test_dashboard_counts_and_average(pool: PgPool) {
    let first = upcoming_event(&pool, "Tech Fest").await;
    let _second = upcoming_event(&pool, "Career Day").await;
    let mut conn = pool.acquire().await.unwrap();

    create_booking(&mut conn, first.id, booking_input("Jo Lee", "jo@x.com"))
        .await
        .unwrap();

    let stats = dashboard_stats(&mut conn).await.unwrap();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.upcoming_events, 2, "Both events are in the future");
    assert_eq!(stats.total_registrations, 1);
    assert_eq!(stats.recent_registrations, 1, "Booking was made just now");
    assert_eq!(stats.avg_registrations_per_event, 0.5);
}
