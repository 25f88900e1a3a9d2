//! Runner error types

use crate::error::FailureKind;
use crate::types::TransactionResult;
use serde::Serialize;
use thiserror::Error;

/// What a wallet can answer instead of a transaction hash
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The user declined the signature prompt
    #[error("User rejected the transaction: {0}")]
    Rejected(String),

    /// No wallet, or the wallet did not respond
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The wallet signed but could not reach the network
    #[error("Wallet network error: {0}")]
    Network(String),
}

impl SigningError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SigningError::Network(_))
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SigningError::Rejected(_) => "rejected",
            SigningError::WalletUnavailable(_) => "wallet_unavailable",
            SigningError::Network(_) => "network",
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SigningError::Rejected(_) => FailureKind::UserRejected,
            SigningError::WalletUnavailable(_) => FailureKind::WalletUnavailable,
            SigningError::Network(_) => FailureKind::Network,
        }
    }
}

/// A run that did not end in a successful commit
///
/// `hash` is set once the wallet has returned one. `result` is set when the
/// transaction was committed but failed on-chain.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct TransactionFailure {
    pub kind: FailureKind,
    pub hash: Option<String>,
    pub message: String,
    pub result: Option<TransactionResult>,
}

impl TransactionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            hash: None,
            message: message.into(),
            result: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// A committed transaction whose execution failed
    pub fn execution_failed(result: TransactionResult) -> Self {
        Self {
            kind: FailureKind::ExecutionFailed,
            hash: Some(result.hash.clone()),
            message: result.vm_status.clone(),
            result: Some(result),
        }
    }
}

impl From<SigningError> for TransactionFailure {
    fn from(err: SigningError) -> Self {
        TransactionFailure::new(err.kind(), err.to_string())
    }
}
