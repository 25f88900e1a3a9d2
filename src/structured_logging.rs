//! Structured logging for transaction runs
//!
//! Every runner invocation logs under its own correlation id so the lines of
//! concurrent runs can be told apart.

use crate::error::FailureKind;
use crate::runner::TransactionState;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Identifies one runner invocation in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured logger for one runner invocation
#[derive(Debug, Clone)]
pub struct TransactionLogger {
    correlation_id: CorrelationId,
}

impl TransactionLogger {
    /// Logger with a fresh correlation id
    pub fn start() -> Self {
        Self::new(CorrelationId::new())
    }

    pub fn new(correlation_id: CorrelationId) -> Self {
        Self { correlation_id }
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn log_built(&self, function: &str, account: Option<&str>) {
        tracing::debug!(
            correlation_id = %self.correlation_id,
            function = %function,
            account = ?account,
            "Transaction built"
        );
    }

    pub fn log_transition(
        &self,
        from: TransactionState,
        to: TransactionState,
        hash: Option<&str>,
    ) {
        tracing::debug!(
            correlation_id = %self.correlation_id,
            from = %from,
            to = %to,
            hash = ?hash,
            "Transaction state changed"
        );
    }

    pub fn log_submitted(&self, hash: &str, latency_ms: u64) {
        tracing::info!(
            correlation_id = %self.correlation_id,
            hash = %hash,
            latency_ms = %latency_ms,
            "Transaction submitted"
        );
    }

    pub fn log_confirmed(&self, hash: &str, version: u64, latency_ms: u64) {
        tracing::info!(
            correlation_id = %self.correlation_id,
            hash = %hash,
            version = %version,
            latency_ms = %latency_ms,
            "Transaction confirmed"
        );
    }

    pub fn log_failed(&self, kind: FailureKind, hash: Option<&str>, error: &str, latency_ms: u64) {
        tracing::warn!(
            correlation_id = %self.correlation_id,
            kind = %kind,
            hash = ?hash,
            error = %error,
            latency_ms = %latency_ms,
            "Transaction failed"
        );
    }

    pub fn log_poll(&self, hash: &str, attempt: u32) {
        tracing::trace!(
            correlation_id = %self.correlation_id,
            hash = %hash,
            attempt = %attempt,
            "Transaction still pending"
        );
    }
}
