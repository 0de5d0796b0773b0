//! Admin authorization middleware.
//!
//! Verifies a signed admin session token from the Authorization header.
//! The previous design trusted a client-supplied `role` header; a bearer
//! token verified against the server's secret closes that gap.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;

use crate::{
    error::{Error, Result},
    services::admin_sessions,
    state::AppState,
};

/// Rejects the request unless it carries a valid admin bearer token.
///
/// # Usage
/// Apply to admin routes using `route_layer()`:
///
/// ```ignore
/// Router::new()
///     .route("/api/admin/dashboard", get(dashboard))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         admin_auth_middleware,
///     ))
/// ```
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
    let token = extract_bearer_token(auth_header)?;

    admin_sessions::verify_admin_token(token, state.config.admin.jwt_secret.expose_secret())?;

    Ok(next.run(request).await)
}

/// Extracts the token from a `Bearer <token>` Authorization header.
fn extract_bearer_token(header: Option<&str>) -> Result<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Authentication("Admin token required".to_string()))
}
