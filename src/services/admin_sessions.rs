//! Admin authentication: config-injected credentials and signed session
//! tokens.
//!
//! Admin callers are distinguished by a server-verified JWT rather than a
//! client-asserted role header. Credentials come from configuration, not
//! from constants in the code.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::{
    config::AdminConfig,
    error::{Error, Result},
};

pub const ADMIN_ROLE: &str = "admin";

/// Claims carried by an admin session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject - the admin email
    pub sub: String,
    /// Role asserted by the server at login time
    pub role: String,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Issued at time as Unix timestamp
    pub iat: i64,
}

/// A freshly issued admin session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verifies admin credentials against configuration and issues a signed
/// session token. The password comparison is constant-time.
pub fn login_admin(config: &AdminConfig, email: &str, password: &str) -> Result<AdminSession> {
    let email_ok = email.trim().to_lowercase() == config.email.to_lowercase();
    let password_ok: bool = password
        .as_bytes()
        .ct_eq(config.password.expose_secret().as_bytes())
        .into();

    if !email_ok || !password_ok {
        return Err(Error::Authentication(
            "Invalid admin credentials".to_string(),
        ));
    }

    let expires_at = Utc::now() + Duration::minutes(config.token_ttl_minutes);
    let token = generate_admin_token(
        &config.email,
        config.jwt_secret.expose_secret(),
        config.token_ttl_minutes,
    )?;

    tracing::info!(email = %config.email, "admin login successful");
    Ok(AdminSession {
        email: config.email.clone(),
        token,
        expires_at,
    })
}

/// Generates a signed admin session token.
pub fn generate_admin_token(email: &str, secret: &str, ttl_minutes: i64) -> Result<String> {
    let now = Utc::now();
    let expiration = now + Duration::minutes(ttl_minutes);

    let claims = AdminClaims {
        sub: email.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate admin token: {}", e)))
}

/// Verifies an admin session token and returns its claims.
///
/// # Errors
/// Returns an authentication error if the token is invalid, expired, or
/// has a bad signature; a forbidden error if the role claim is not admin.
pub fn verify_admin_token(token: &str, secret: &str) -> Result<AdminClaims> {
    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        let error_msg = e.to_string().to_lowercase();
        if error_msg.contains("expired") {
            Error::Authentication("Admin session has expired".to_string())
        } else {
            Error::Authentication("Invalid admin token".to_string())
        }
    })?;

    if token_data.claims.role != ADMIN_ROLE {
        return Err(Error::Forbidden(
            "Access denied. Admin role required.".to_string(),
        ));
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            email: "admin@college.com".to_string(),
            password: "correct-horse".to_string().into(),
            jwt_secret: "test-secret".to_string().into(),
            token_ttl_minutes: 60,
        }
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let config = test_config();
        let session = login_admin(&config, "admin@college.com", "correct-horse").unwrap();

        let claims = verify_admin_token(&session.token, "test-secret").unwrap();
        assert_eq!(claims.sub, "admin@college.com");
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn test_login_email_is_case_insensitive() {
        let config = test_config();
        assert!(login_admin(&config, "Admin@College.COM", "correct-horse").is_ok());
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let config = test_config();
        let result = login_admin(&config, "admin@college.com", "wrong");
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[test]
    fn test_login_rejects_wrong_email() {
        let config = test_config();
        let result = login_admin(&config, "someone@else.com", "correct-horse");
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = generate_admin_token("admin@college.com", "secret-a", 60).unwrap();
        assert!(verify_admin_token(&token, "secret-b").is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = generate_admin_token("admin@college.com", "test-secret", -10).unwrap();
        let result = verify_admin_token(&token, "test-secret");
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_admin_token("not-a-token", "test-secret").is_err());
    }
}
