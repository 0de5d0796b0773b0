use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An admin-created event, the target of registrations.
///
/// Wire names are camelCase to preserve the public API contract.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Calendar date only; no time-of-day semantics.
    pub date: NaiveDate,
    pub venue: String,
    pub capacity: i32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub venue: String,
    pub capacity: i32,
    pub category: Option<String>,
    pub created_by: String,
}

/// An event together with its registration count, for the admin listing.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventWithCount {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub venue: String,
    pub capacity: i32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub registration_count: i64,
}
