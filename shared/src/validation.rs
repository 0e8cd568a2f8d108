//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Uses both custom validators and the `validator` crate.

use chrono::{DateTime, Utc};
use validator::ValidateEmail;

/// Maximum accepted password length in bytes
pub const MAX_PASSWORD_LEN: usize = 128;

/// Maximum task title length in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Validate username format: 3-64 characters of `[A-Za-z0-9_.-]`
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    let username_regex = regex_lite::Regex::new(r"^[A-Za-z0-9_.-]{3,64}$").unwrap();
    if !username_regex.is_match(username) {
        return Err(
            "Username must be 3-64 characters of letters, digits, '_', '.' or '-'".to_string(),
        );
    }
    Ok(())
}

/// Validate password
///
/// No strength policy is enforced; the password only has to be present and
/// bounded so hashing cost stays predictable.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate task title
pub fn validate_task_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {} characters", MAX_TITLE_LEN));
    }
    Ok(())
}

/// Validate that a task is not due before it starts
pub fn validate_task_window(start: DateTime<Utc>, due: DateTime<Utc>) -> Result<(), String> {
    if due < start {
        return Err("Due date cannot be before start date".to_string());
    }
    Ok(())
}
