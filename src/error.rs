//! Shared failure taxonomy
//!
//! Every component error maps onto a [`FailureKind`] so callers can pick
//! distinct messaging ("you declined to sign" vs. "network error, retry")
//! without matching on each component's error enum.

use serde::{Deserialize, Serialize};

/// Tag attached to every failure surfaced by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The user declined to sign in their wallet
    UserRejected,
    /// No wallet connected, or the wallet could not be reached
    WalletUnavailable,
    /// The node or indexer could not be reached
    Network,
    /// The transaction was committed but its execution failed on-chain
    ExecutionFailed,
    /// Finality was not observed within the configured bound
    Timeout,
    /// A view call or indexer query failed
    QueryFailed,
    /// Malformed local input (bad address, identifier or type tag)
    InvalidInput,
}

impl FailureKind {
    /// Stable lowercase label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserRejected => "user_rejected",
            Self::WalletUnavailable => "wallet_unavailable",
            Self::Network => "network",
            Self::ExecutionFailed => "execution_failed",
            Self::Timeout => "timeout",
            Self::QueryFailed => "query_failed",
            Self::InvalidInput => "invalid_input",
        }
    }

    /// Whether retrying the same request might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::QueryFailed)
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
