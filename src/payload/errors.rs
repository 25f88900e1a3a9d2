//! Error types for the payload builder
//!
//! Building a payload has no network I/O, so the only failures are
//! malformed inputs supplied as strings.

use crate::error::FailureKind;
use thiserror::Error;

/// Error type for payload construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Input could not be parsed as an account/object address
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress {
        /// The rejected input, as given
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// A module or function name is not a valid Move identifier
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// A coin type or other type tag could not be parsed
    #[error("Invalid type tag '{input}': {reason}")]
    InvalidTypeTag { input: String, reason: String },
}

impl PayloadError {
    /// Payload errors are input errors; retrying never helps
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "address",
            Self::InvalidIdentifier(_) => "identifier",
            Self::InvalidTypeTag { .. } => "type_tag",
        }
    }

    pub fn kind(&self) -> FailureKind {
        FailureKind::InvalidInput
    }

    pub(crate) fn invalid_address(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_type_tag(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTypeTag {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
