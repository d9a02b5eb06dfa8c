//! Typed configuration errors
//!
//! Validation failures are *data*: they surface through `is_valid() == false`
//! and a [`MessageTree`](crate::core::MessageTree), never through this type.
//! [`InputFilterError`] is reserved for misuse of the tree itself: asking for
//! an input that does not exist, a validation group naming unknown inputs, a
//! negative collection count or a payload of the wrong shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use inputfilter::prelude::*;
//!
//! match filter.set_validation_group(["username", "nope"]) {
//!     Err(InputFilterError::UnknownValidationGroupInput(name)) => {
//!         eprintln!("no input called {}", name);
//!     }
//!     _ => {}
//! }
//! ```

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = InputFilterError> = std::result::Result<T, E>;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised when the input tree is misconfigured or misused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputFilterError {
    /// A lookup referenced a child name that is not registered
    #[error("no input named '{0}' is registered")]
    UnknownInput(String),

    /// A validation group referenced a child name that is not registered
    #[error("validation group references unknown input '{0}'")]
    UnknownValidationGroupInput(String),

    /// A collection count was set to a negative number
    #[error("collection count must be non-negative, got {0}")]
    InvalidCount(i64),

    /// `set_data` was called with a payload of the wrong JSON type
    #[error("expected {expected} payload, got {actual}")]
    InvalidPayload {
        expected: &'static str,
        actual: &'static str,
    },
}

impl InputFilterError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            InputFilterError::UnknownInput(_) => "UNKNOWN_INPUT",
            InputFilterError::UnknownValidationGroupInput(_) => "UNKNOWN_VALIDATION_GROUP_INPUT",
            InputFilterError::InvalidCount(_) => "INVALID_COUNT",
            InputFilterError::InvalidPayload { .. } => "INVALID_PAYLOAD",
        }
    }
}
