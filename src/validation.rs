//! Shared client-side validation rules.
//!
//! Validation runs before any network call. Failures are field-scoped so a
//! form can show each message next to the offending input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a ticket subject (in characters).
pub const MIN_SUBJECT_LENGTH: usize = 10;

/// Minimum length for a ticket description (in characters).
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s-]{8,15}$").expect("phone pattern is valid"));

// ============================================================================
// Field errors
// ============================================================================

/// Ordered collection of per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Drop the message for `field` (the user started editing it again).
    pub fn clear(&mut self, field: &str) {
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when no field failed, otherwise a validation error.
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::TickkkError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {field}: {message}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Rules
// ============================================================================

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Record `message` under `field` when `value` is blank. Returns whether the
/// value was present.
pub fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) -> bool {
    if is_blank(value) {
        errors.add(field, message);
        false
    } else {
        true
    }
}

/// Record a message when `value` is shorter than `min` characters.
pub fn require_min_length(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) {
    if value.chars().count() < min {
        errors.add(field, message);
    }
}
