use thiserror::Error;

use crate::models::registrations::Registration;

// Import Axum types for HTTP response conversion
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A validation error (malformed or missing input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A conflict error (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A second registration attempt for the same (event, email) pair.
    /// Carries the existing registration so the caller can show it.
    #[error("Already registered for this event")]
    DuplicateRegistration(Box<Registration>),

    /// An authentication error (invalid credentials or token).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A forbidden error (caller lacks the required role).
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// A failure in the upstream chat-completion service.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert custom Error to HTTP response
///
/// Maps each error variant to an HTTP status code and a JSON body with an
/// error message and error code. Database details are never exposed.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) | Error::DuplicateRegistration(_) => StatusCode::CONFLICT,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Sqlx(_) | Error::Upstream(_) | Error::Internal(_) | Error::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match self {
            Error::Validation(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "VALIDATION_ERROR"
                })
            }
            Error::NotFound(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "NOT_FOUND"
                })
            }
            Error::Conflict(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "CONFLICT"
                })
            }
            Error::DuplicateRegistration(existing) => {
                serde_json::json!({
                    "error": "You have already registered for this event",
                    "code": "CONFLICT",
                    "existingBooking": existing
                })
            }
            Error::Authentication(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "AUTHENTICATION_FAILED"
                })
            }
            Error::Forbidden(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "FORBIDDEN"
                })
            }
            Error::Upstream(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "UPSTREAM_ERROR"
                })
            }
            Error::Sqlx(e) => {
                tracing::error!(error = %e, "database error");
                serde_json::json!({
                    "error": "Database error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                serde_json::json!({
                    "error": msg,
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                serde_json::json!({
                    "error": "Configuration error",
                    "code": "CONFIG_ERROR"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registrations::{SOURCE_WEB, STATUS_CONFIRMED};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    #[test]
    fn test_validation_maps_to_400() {
        let response = Error::Validation("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = Error::NotFound("Event not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let response = Error::Conflict("already exists".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_maps_to_401() {
        let response = Error::Authentication("bad token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response = Error::Forbidden("admin only".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_maps_to_500() {
        let response = Error::Upstream("model unavailable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_duplicate_registration_carries_existing_booking() {
        let existing = Registration {
            id: Uuid::now_v7(),
            event_id: Uuid::now_v7(),
            event_name: "Tech Fest".to_string(),
            event_date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
            event_venue: "Main Hall".to_string(),
            user_name: "Jo Lee".to_string(),
            user_email: "jo@x.com".to_string(),
            user_phone: None,
            booking_date: Utc::now(),
            status: STATUS_CONFIRMED.to_string(),
            registration_source: SOURCE_WEB.to_string(),
            ip_address: None,
        };
        let booking_id = existing.id;

        let response = Error::DuplicateRegistration(Box::new(existing)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "CONFLICT");
        assert_eq!(json["existingBooking"]["id"], booking_id.to_string());
        assert_eq!(json["existingBooking"]["userEmail"], "jo@x.com");
        assert_eq!(json["existingBooking"]["status"], "confirmed");
    }
}
