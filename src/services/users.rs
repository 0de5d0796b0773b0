//! User account registration and login.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::{
        requests::{LoginRequest, RegisterUserRequest},
        users::{NewUser, User},
    },
    queries::users,
    validation,
};

/// Registers a new user with input validation and argon2 password hashing.
///
/// Email uniqueness is enforced by the database constraint; a duplicate
/// surfaces as a conflict, not a race-prone pre-insert lookup.
pub async fn register_user(conn: &mut DbConn, request: RegisterUserRequest) -> Result<User> {
    let name = validation::validate_name(request.name.as_deref().unwrap_or_default())?;
    let email = request.email.as_deref().unwrap_or_default();
    validation::validate_email(email)?;
    let email = validation::normalize_email(email);
    let password = request.password.as_deref().unwrap_or_default();
    validation::validate_password(password)?;

    let password_hash = hash_password(password)?;

    let new_user = NewUser {
        name,
        email,
        password_hash,
        phone: validation::normalize_phone(request.phone.as_deref()),
    };

    let user = users::create_user(conn, new_user).await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// A missing account and a wrong password produce the same error so the
/// response does not reveal which emails are registered.
pub async fn login_user(conn: &mut DbConn, request: LoginRequest) -> Result<User> {
    let (Some(email), Some(password)) = (request.email.as_deref(), request.password.as_deref())
    else {
        return Err(Error::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let email = validation::normalize_email(email);
    let user = users::get_user_by_email(conn, &email)
        .await?
        .ok_or_else(|| Error::Authentication("Invalid email or password".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(Error::Authentication("Invalid email or password".to_string()));
    }

    Ok(user)
}

/// Hashes a password with a fresh salt using Argon2.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a password hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
