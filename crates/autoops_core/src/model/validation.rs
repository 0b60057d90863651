//! Field-level validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Collected field errors for one payload.
///
/// Validation reports every broken field at once instead of stopping at the
/// first one, so callers can surface the full list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error set holding a single field error.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Appends every error from `other`, keeping order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Human-readable messages in push order.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|error| error.message.clone())
            .collect()
    }

    /// Returns `Ok(())` when nothing was pushed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Checks a required text field against an inclusive character bound.
    pub(crate) fn require_text(
        &mut self,
        field: &'static str,
        label: &str,
        value: &str,
        max_chars: usize,
    ) {
        if value.trim().is_empty() {
            self.push(field, format!("{label} is required"));
        } else {
            self.limit_text(field, label, value, max_chars);
        }
    }

    pub(crate) fn limit_text(
        &mut self,
        field: &'static str,
        label: &str,
        value: &str,
        max_chars: usize,
    ) {
        if value.chars().count() > max_chars {
            self.push(
                field,
                format!("{label} must be at most {max_chars} characters"),
            );
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::ValidationErrors;

    #[test]
    fn require_text_rejects_blank_and_overlong_values() {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", "   ", 10);
        errors.require_text("name", "Name", "abcdefghijk", 10);
        errors.require_text("ok", "Ok", "fine", 10);

        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "name"]);
        assert_eq!(errors.messages()[0], "Title is required");
    }

    #[test]
    fn into_result_is_ok_when_empty() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("x", "bad").into_result().is_err());
    }
}
