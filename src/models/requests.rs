//! Request bodies for the HTTP surface.
//!
//! Required-but-missing fields are modeled as `Option` so the handlers can
//! reject them with a 400 validation error instead of a framework-level
//! deserialization failure.

use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct BookEventRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelBookingRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: Option<String>,
    pub venue: Option<String>,
    pub capacity: Option<i32>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatQueryRequest {
    pub query: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationsFilter {
    #[serde(rename = "eventId")]
    pub event_id: Option<Uuid>,
}
