//! Input validation for API requests.
//!
//! Field checks return `Result<(), String>`; request-level checks collect them
//! into an `ApiError` through `ValidationErrorBuilder`.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ApiError, ValidationErrorBuilder};
use crate::db::UserRequest;

/// Ids are stored in 255-character columns
pub const MAX_ID_LENGTH: usize = 255;

lazy_static! {
    /// Loose email shape: something@domain.tld, no whitespace
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validate a resource id taken from the path
pub fn validate_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Id is required".to_string());
    }

    if id.chars().count() > MAX_ID_LENGTH {
        return Err(format!("Id is too long (max {} characters)", MAX_ID_LENGTH));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.chars().count() > 255 {
        return Err("Email is too long (max 255 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Email must be a valid email address".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

/// Validate a UserRequest (create and update share the same rules)
pub fn validate_user_request(req: &UserRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_email(&req.email) {
        errors.add("Email", e);
    }

    if let Err(e) = validate_password(&req.password) {
        errors.add("Password", e);
    }

    errors.finish()
}
