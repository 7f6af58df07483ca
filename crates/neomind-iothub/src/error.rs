//! Error types for IoT Hub connection handling.

use thiserror::Error;

/// Result type for connection descriptor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or validating connection descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required parameter or descriptor field was absent or empty.
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// A value did not have the expected shape.
    #[error("Type mismatch: '{name}' must be of type {expected}")]
    TypeMismatch { name: String, expected: String },

    /// The raw connection string could not be tokenized.
    #[error("Malformed connection string: {0}")]
    MalformedConnectionString(String),
}

impl Error {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    pub fn type_mismatch(name: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// Name of the offending parameter, if the error refers to one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingParameter(name) => Some(name),
            Self::TypeMismatch { name, .. } => Some(name),
            Self::MalformedConnectionString(_) => None,
        }
    }
}
