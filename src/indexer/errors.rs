use crate::error::FailureKind;
use thiserror::Error;

/// Errors from the GraphQL indexer
#[derive(Debug, Clone, Error)]
pub enum IndexerError {
    /// The endpoint could not be reached
    #[error("Transport error: {message} (endpoint: {endpoint})")]
    Transport { endpoint: String, message: String },

    /// Non-success HTTP status
    #[error("Indexer returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The query was rejected by the GraphQL layer
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Response had neither `data` nor `errors`
    #[error("Response has no data")]
    MissingData,

    /// `data` did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl IndexerError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            IndexerError::Transport { .. } => true,
            IndexerError::Http { status, .. } => *status == 429 || (500..600).contains(status),
            IndexerError::GraphQl(_) | IndexerError::MissingData | IndexerError::Decode(_) => {
                false
            }
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            IndexerError::Transport { .. } => "transport",
            IndexerError::Http { .. } => "http",
            IndexerError::GraphQl(_) => "graphql",
            IndexerError::MissingData => "missing_data",
            IndexerError::Decode(_) => "decode",
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            IndexerError::Transport { .. } => FailureKind::Network,
            _ => FailureKind::QueryFailed,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, endpoint: &str) -> Self {
        if err.is_decode() {
            IndexerError::Decode(err.to_string())
        } else {
            IndexerError::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_display() {
        let err = IndexerError::GraphQl(vec![
            "field 'nope' not found".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: field 'nope' not found; second"
        );
        assert_eq!(err.kind(), FailureKind::QueryFailed);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_http_retryable() {
        let err = IndexerError::Http {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.category(), "http");
    }
}
