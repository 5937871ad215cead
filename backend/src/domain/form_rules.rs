//! Field-level validation shared by the structure, registration and case-file
//! forms.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;

use super::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Stable machine-readable reason.
    pub code: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldError {
    /// Construct a field error.
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.message.clone())
            .with_details(json!({ "field": value.field, "code": value.code }))
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Trim `value` and require at least `min` characters.
pub fn min_chars(field: &'static str, value: &str, min: usize) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(
            field,
            "required",
            format!("{field} must not be empty"),
        ));
    }
    if trimmed.chars().count() < min {
        return Err(FieldError::new(
            field,
            "too_short",
            format!("{field} must contain at least {min} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Require a plausible e-mail address; the result is lower-cased.
pub fn email(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if !email_regex().is_match(trimmed) {
        return Err(FieldError::new(
            field,
            "invalid_email",
            format!("{field} must be a valid e-mail address"),
        ));
    }
    Ok(trimmed.to_lowercase())
}
