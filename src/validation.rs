//! Input validation utilities for the service layer.
//!
//! Pure functions checking email shape, registrant name length, and
//! password length, plus email normalization.

use crate::error::{Error, Result};

/// Validates that an email has a `local@domain.tld` shape.
///
/// # Examples
/// ```
/// use campus_events::validation::validate_email;
///
/// validate_email("user@example.com").unwrap();
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    if email.len() > 254 {
        return Err(Error::Validation(
            "Email address is too long (max 254 characters)".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    let (local_part, domain) = (parts[0], parts[1]);

    if local_part.is_empty() || domain.is_empty() {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    // Domain must carry a TLD
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    if email.contains(char::is_whitespace) {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    Ok(())
}

/// Lowercases and trims an email for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a registrant or user name: at least 2 characters after
/// trimming.
pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();

    if name.chars().count() < 2 {
        return Err(Error::Validation(
            "Name must be at least 2 characters long".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(Error::Validation(
            "Name must be less than 100 characters".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// Validates password length for user registration.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        return Err(Error::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(Error::Validation(
            "Password is too long (max 128 characters)".to_string(),
        ));
    }

    Ok(())
}

/// Trims an optional phone number, dropping it entirely when blank.
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.email+tag@domain.co.uk").is_ok());
        assert!(validate_email("  padded@domain.com  ").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@@domain.com").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("user name@domain.com").is_err());
        assert!(validate_email("user@.com").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jo@X.Com "), "jo@x.com");
        assert_eq!(normalize_email("already@lower.com"), "already@lower.com");
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Jo Lee").unwrap(), "Jo Lee");
        assert_eq!(validate_name("  Jo  ").unwrap(), "Jo");
        assert!(validate_name("J").is_err());
        assert!(validate_name(" ").is_err());
        assert!(validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(
            normalize_phone(Some(" 5551234567 ")),
            Some("5551234567".to_string())
        );
        assert_eq!(normalize_phone(Some("   ")), None);
        assert_eq!(normalize_phone(None), None);
    }
}
