//! Dashboard reporting. Aggregates are computed by the database instead of
//! full collection scans.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::DbConn;
use crate::error::Result;

/// Summary figures for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: i64,
    pub upcoming_events: i64,
    pub total_registrations: i64,
    pub recent_registrations: i64,
    pub avg_registrations_per_event: f64,
}

/// Computes dashboard figures: totals, events dated today or later,
/// registrations in the trailing 7 days, and the per-event average.
pub async fn dashboard_stats(conn: &mut DbConn) -> Result<DashboardStats> {
    // Same clock as the booking guard: the application's UTC date, not the
    // database server's.
    let today = Utc::now().date_naive();
    let week_ago = Utc::now() - Duration::days(7);

    let row: (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(*) FILTER (WHERE date >= $1)
        FROM events
        "#,
    )
    .bind(today)
    .fetch_one(&mut *conn)
    .await?;
    let (total_events, upcoming_events) = row;

    let row: (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(*) FILTER (WHERE booking_date >= $1)
        FROM registrations
        "#,
    )
    .bind(week_ago)
    .fetch_one(&mut *conn)
    .await?;
    let (total_registrations, recent_registrations) = row;

    Ok(DashboardStats {
        total_events,
        upcoming_events,
        total_registrations,
        recent_registrations,
        avg_registrations_per_event: average_per_event(total_registrations, total_events),
    })
}

/// Average registrations per event, rounded to one decimal place. Zero
/// when there are no events.
pub fn average_per_event(registrations: i64, events: i64) -> f64 {
    if events == 0 {
        return 0.0;
    }
    (registrations as f64 / events as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_zero_without_events() {
        assert_eq!(average_per_event(0, 0), 0.0);
        assert_eq!(average_per_event(5, 0), 0.0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        assert_eq!(average_per_event(7, 2), 3.5);
        assert_eq!(average_per_event(1, 3), 0.3);
        assert_eq!(average_per_event(2, 3), 0.7);
        assert_eq!(average_per_event(10, 4), 2.5);
        assert_eq!(average_per_event(0, 5), 0.0);
    }
}
