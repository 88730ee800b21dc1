//! Input validation utilities.
//!
//! This module provides validation functions for the Confluence base URL,
//! the API token, and role keyword lists before any request is made.

use regex::Regex;

use crate::errors::ValidationError;

/// Base URLs must use http or https and carry a host.
const VALID_BASE_URL_PATTERN: &str = r"^https?://[^\s/]+(/\S*)?$";

/// Validate a Confluence base URL.
///
/// # Errors
///
/// Returns an error if:
/// - The URL is empty
/// - The URL does not start with `http://` or `https://`
/// - The URL contains whitespace or has no host
pub fn validate_base_url(url: &str) -> Result<(), ValidationError> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::BaseUrl(
            "Confluence URL cannot be empty".to_string(),
        ));
    }

    let re = Regex::new(VALID_BASE_URL_PATTERN)
        .map_err(|e| ValidationError::BaseUrl(format!("Failed to compile validation regex: {e}")))?;

    if !re.is_match(trimmed) {
        return Err(ValidationError::BaseUrl(format!(
            "Expected an http(s) URL with a host. Got: '{}'",
            trimmed
        )));
    }

    Ok(())
}

/// Validate a Confluence API token (basic checks).
///
/// Personal access tokens are opaque, so only emptiness and embedded
/// whitespace are rejected.
pub fn validate_token(token: &str) -> Result<(), ValidationError> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Token(
            "Confluence API key cannot be empty".to_string(),
        ));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::Token(
            "Confluence API key cannot contain whitespace".to_string(),
        ));
    }

    Ok(())
}

/// Validate an ordered list of role keywords.
///
/// The list must contain at least one keyword and none may be blank.
pub fn validate_role_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<(), ValidationError> {
    if keywords.is_empty() {
        return Err(ValidationError::RoleKeyword(
            "At least one role keyword is required".to_string(),
        ));
    }

    if let Some(idx) = keywords.iter().position(|k| k.as_ref().trim().is_empty()) {
        return Err(ValidationError::RoleKeyword(format!(
            "Role keyword #{} is blank",
            idx + 1
        )));
    }

    Ok(())
}
