//! Shared primitives for the log group inventory crates.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across inventory crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty, trimmed UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string with surrounding whitespace removed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identity or listing collaborator failed: auth, throttling, network or
    /// a malformed response.
    #[error("provider error: {0}")]
    Provider(String),

    /// The report could not be persisted.
    #[error("write error: {0}")]
    Write(String),

    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_trims_surrounding_whitespace() {
        let value = NonEmptyString::new("  us-east-1 ");
        assert!(value.is_ok());
        assert_eq!(
            value.map(String::from).unwrap_or_default(),
            "us-east-1".to_owned()
        );
    }

    #[test]
    fn provider_error_message_names_category() {
        let error = AppError::Provider("throttled".to_owned());
        assert_eq!(error.to_string(), "provider error: throttled");
    }
}
