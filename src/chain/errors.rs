use crate::error::FailureKind;
use thiserror::Error;

/// Errors from the node REST API
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    /// Connection refused, DNS failure, TLS error and the like
    #[error("Transport error: {message} (endpoint: {endpoint})")]
    Transport { endpoint: String, message: String },

    /// The HTTP request itself timed out
    #[error("Request timed out (endpoint: {endpoint})")]
    Timeout { endpoint: String },

    /// The node has no record of the requested resource
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Non-success HTTP status from the node
    #[error("Node returned {status}: {message} (endpoint: {endpoint})")]
    Response {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ChainError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ChainError::Transport { .. } => true,
            ChainError::Timeout { .. } => true,
            ChainError::Response { status, .. } => *status == 429 || (500..600).contains(status),
            ChainError::NotFound { .. } => false,
            ChainError::Decode(_) => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ChainError::Transport { .. } => "transport",
            ChainError::Timeout { .. } => "timeout",
            ChainError::NotFound { .. } => "not_found",
            ChainError::Response { .. } => "response",
            ChainError::Decode(_) => "decode",
        }
    }

    /// Network-level failures map to `Network`; the rest are query failures
    pub fn kind(&self) -> FailureKind {
        match self {
            ChainError::Transport { .. } | ChainError::Timeout { .. } => FailureKind::Network,
            _ => FailureKind::QueryFailed,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ChainError::NotFound { .. })
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, endpoint: &str) -> Self {
        if err.is_timeout() {
            ChainError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else if err.is_decode() {
            ChainError::Decode(err.to_string())
        } else {
            ChainError::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }
}
