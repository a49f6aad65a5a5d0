//! Shared primitives for all Rust crates in OpsDesk.

#![forbid(unsafe_code)]

/// Per-field form validation messages.
pub mod field_errors;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use field_errors::FieldErrors;

/// Result type used across OpsDesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier of one row in a back-office collection.
///
/// Seeded rows keep their literal ids (`ar-3`, `tk-1002`); rows created at
/// runtime receive a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a random record identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "record id must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A submitted form failed one or more field checks.
    #[error("form validation failed: {0}")]
    InvalidForm(FieldErrors),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FieldErrors> for AppError {
    fn from(value: FieldErrors) -> Self {
        Self::InvalidForm(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, FieldErrors, RecordId};

    #[test]
    fn generated_record_id_formats_as_uuid() {
        let record_id = RecordId::generate();
        assert_eq!(record_id.to_string().len(), 36);
    }

    #[test]
    fn parsed_record_id_is_trimmed() {
        let record_id = RecordId::parse("  ar-3 ").unwrap_or_else(|_| unreachable!());
        assert_eq!(record_id.as_str(), "ar-3");
        assert!(RecordId::parse(" ").is_err());
    }

    #[test]
    fn field_errors_convert_into_invalid_form() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Name is required");

        let error = AppError::from(errors);
        assert!(matches!(error, AppError::InvalidForm(_)));
        assert_eq!(
            error.to_string(),
            "form validation failed: name: Name is required"
        );
    }
}
