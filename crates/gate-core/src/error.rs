//! Error types for the Cloud Gate domain layer.
//!
//! # Example
//!
//! ```
//! use gate_core::{CoreError, ExtraParams};
//!
//! let err = ExtraParams::parse("location").unwrap_err();
//! assert!(matches!(err, CoreError::InvalidParameter { .. }));
//! ```

use thiserror::Error;

/// Errors raised while validating request input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A `key=value` segment could not be parsed.
    #[error("Invalid parameter '{segment}': {reason}")]
    InvalidParameter {
        /// The offending segment as received
        segment: String,
        /// Why it was rejected
        reason: String,
    },

    /// A parameter required by the operation is absent.
    #[error("Extra parameter is not specified: {0}")]
    MissingParameter(String),
}

impl CoreError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing parameter error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }
}

/// Result alias for domain operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::missing_parameter("location");
        assert_eq!(
            err.to_string(),
            "Extra parameter is not specified: location"
        );

        let err = CoreError::invalid_parameter("region", "expected key=value");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'region': expected key=value"
        );
    }
}
