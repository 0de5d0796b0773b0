use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status assigned to every registration the booking workflow creates.
pub const STATUS_CONFIRMED: &str = "confirmed";

/// Source tag recorded on every registration.
pub const SOURCE_WEB: &str = "web";

/// A booking linking a registrant to one event.
///
/// Event name, date and venue are denormalized copies captured at booking
/// time. Wire names are camelCase to preserve the public API contract.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_venue: String,
    pub user_name: String,
    /// Normalized lowercase.
    pub user_email: String,
    pub user_phone: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub status: String,
    pub registration_source: String,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_venue: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub ip_address: Option<String>,
}

/// The subset of registration fields returned by the confirmation view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub user_name: String,
    pub user_email: String,
    pub booking_date: DateTime<Utc>,
    pub status: String,
}

impl From<Registration> for BookingConfirmation {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            event_name: registration.event_name,
            event_date: registration.event_date,
            user_name: registration.user_name,
            user_email: registration.user_email,
            booking_date: registration.booking_date,
            status: registration.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registration() -> Registration {
        Registration {
            id: Uuid::now_v7(),
            event_id: Uuid::now_v7(),
            event_name: "Tech Fest".to_string(),
            event_date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
            event_venue: "Main Hall".to_string(),
            user_name: "Jo Lee".to_string(),
            user_email: "jo@x.com".to_string(),
            user_phone: Some("5551234567".to_string()),
            booking_date: Utc::now(),
            status: STATUS_CONFIRMED.to_string(),
            registration_source: SOURCE_WEB.to_string(),
            ip_address: None,
        }
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let json = serde_json::to_value(sample_registration()).unwrap();
        assert!(json.get("eventId").is_some());
        assert!(json.get("userEmail").is_some());
        assert!(json.get("bookingDate").is_some());
        assert!(json.get("event_id").is_none());
    }

    #[test]
    fn test_confirmation_keeps_identity_fields() {
        let registration = sample_registration();
        let id = registration.id;
        let confirmation = BookingConfirmation::from(registration);
        assert_eq!(confirmation.id, id);
        assert_eq!(confirmation.status, STATUS_CONFIRMED);
        assert_eq!(confirmation.user_email, "jo@x.com");
    }
}
