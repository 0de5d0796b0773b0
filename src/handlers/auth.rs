//! User registration and login handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::Result,
    models::requests::{LoginRequest, RegisterUserRequest},
    services::users,
    state::AppState,
};

/// POST /api/auth/register
///
/// Registers a new user account.
///
/// # Request Body
/// - `name`: At least 2 characters
/// - `email`: Must be unique; stored normalized lowercase
/// - `password`: At least 6 characters
/// - `phone`: Optional
///
/// # HTTP Status Codes
/// - `201 CREATED`: User registered; the response never carries the
///   password hash
/// - `400 BAD_REQUEST`: Validation error
/// - `409 CONFLICT`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = super::acquire(&state).await?;

    let user = users::register_user(&mut conn, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User created successfully",
            "user": user,
        })),
    ))
}

/// POST /api/auth/login
///
/// Authenticates a user with email and password.
///
/// # HTTP Status Codes
/// - `200 OK`: Authentication successful
/// - `400 BAD_REQUEST`: Missing email or password
/// - `401 UNAUTHORIZED`: Invalid email or password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = super::acquire(&state).await?;

    let user = users::login_user(&mut conn, request).await?;

    Ok(Json(serde_json::json!({
        "message": "Login successful",
        "user": user,
    })))
}
