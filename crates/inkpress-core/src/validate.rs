//! Form validation primitives.
//!
//! Validation errors accumulate per field so a submission reports every
//! problem at once; a form with any field error performs no write.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A single validation failure on one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Per-field collection of validation failures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldErrors {
    pub errors: BTreeMap<String, Vec<FieldError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.entry(error.field.clone()).or_default().push(error);
    }

    pub fn add_error(&mut self, field: &str, message: &str, code: &str) {
        self.add(FieldError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.get(field).map(|e| !e.is_empty()).unwrap_or(false)
    }

    /// Consume into a result: `Ok` if nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        write!(f, "validation failed for {} field(s)", self.errors.len())?;
        for errors in self.errors.values() {
            for error in errors {
                write!(f, "; {}: {}", error.field, error.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Require a non-empty (after trim) string value.
pub fn required(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add_error(field, "This field is required", "required");
    }
}

/// Enforce a character-count range on a value. Skipped when empty so it
/// composes with [`required`] without double-reporting.
pub fn length(errors: &mut FieldErrors, field: &str, value: &str, min: usize, max: usize) {
    let count = value.chars().count();
    if count == 0 {
        return;
    }
    if count < min {
        errors.add_error(
            field,
            &format!("Must be at least {min} characters"),
            "min_length",
        );
    } else if count > max {
        errors.add_error(
            field,
            &format!("Must be at most {max} characters"),
            "max_length",
        );
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

/// Require a plausibly formed email address.
pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        return;
    }
    if !email_pattern().is_match(value) {
        errors.add_error(field, "Enter a valid email address", "invalid_email");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", "Ada");
        assert!(errors.is_empty());

        required(&mut errors, "message", "   ");
        assert!(errors.has_field("message"));
    }

    #[test]
    fn test_length_bounds() {
        let mut errors = FieldErrors::new();
        length(&mut errors, "username", "ab", 3, 150);
        assert!(errors.has_field("username"));

        let mut errors = FieldErrors::new();
        length(&mut errors, "username", &"x".repeat(151), 3, 150);
        assert!(errors.has_field("username"));

        let mut errors = FieldErrors::new();
        length(&mut errors, "username", "ada", 3, 150);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_length_skips_empty() {
        let mut errors = FieldErrors::new();
        length(&mut errors, "phone", "", 1, 20);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email() {
        let mut errors = FieldErrors::new();
        email(&mut errors, "email", "ada@x.com");
        assert!(errors.is_empty());

        email(&mut errors, "email", "not-an-email");
        assert!(errors.has_field("email"));
    }

    #[test]
    fn test_accumulates_multiple_fields() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", "");
        required(&mut errors, "message", "");
        email(&mut errors, "email", "bad");
        assert_eq!(errors.errors.len(), 3);
        let result = errors.into_result();
        assert!(result.is_err());
    }
}
