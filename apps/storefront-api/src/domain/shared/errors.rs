//! Domain errors shared across bounded contexts.

use std::fmt;

/// Validation errors raised by shared value objects.
///
/// These errors are independent of infrastructure concerns. The owning
/// context maps them into its own error taxonomy (usually as a field-level
/// parameter error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
