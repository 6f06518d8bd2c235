//! Error types for wire-value extraction.

use thiserror::Error;

/// Structured error type for typed access to wire values.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WireError {
    /// A wire value did not have the shape a typed accessor expected.
    #[error("wire type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl WireError {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        WireError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        matches!(self, WireError::TypeMismatch { .. })
    }
}
