//! Transaction runner
//!
//! Drives one descriptor through submit, wait and fetch:
//!
//! 1. **Built**: fail fast as `WalletUnavailable` if no account is connected
//! 2. **Submitted**: the wallet signs and submits, returning a hash
//! 3. **Pending**: poll the node every `poll_interval` until the transaction
//!    is committed, bounded by `confirmation_timeout`
//! 4. **Confirmed**: fetch the full record once, inside the same bound
//!
//! Every failure comes back as [`TransactionOutcome::Failed`] tagged with a
//! [`FailureKind`]; nothing is thrown past the runner.
//!
//! ## Cancellation
//!
//! Dropping the future returned by [`TransactionRunner::run`] only stops
//! observation. Once the wallet has submitted, the transaction proceeds on
//! chain regardless, and its hash can be handed to
//! [`TransactionRunner::await_confirmation`] later.

pub mod errors;
pub mod signer;
pub mod state;

pub use errors::{SigningError, TransactionFailure};
pub use signer::{SubmitOptions, TransactionContext, WalletSigner};
pub use state::TransactionState;

use crate::chain::ChainClient;
use crate::error::FailureKind;
use crate::payload::TransactionDescriptor;
use crate::structured_logging::TransactionLogger;
use crate::types::{TransactionResult, TransactionStatus};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Polling cadence and finality bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub poll_interval: Duration,
    pub confirmation_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            confirmation_timeout: Duration::from_secs(30),
        }
    }
}

/// Tagged result of a run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransactionOutcome {
    Confirmed(TransactionResult),
    Failed(TransactionFailure),
}

impl TransactionOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Hash, if the wallet got far enough to return one
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Confirmed(result) => Some(&result.hash),
            Self::Failed(failure) => failure.hash.as_deref(),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Confirmed(_) => None,
            Self::Failed(failure) => Some(failure.kind),
        }
    }

    pub fn into_result(self) -> Result<TransactionResult, TransactionFailure> {
        match self {
            Self::Confirmed(result) => Ok(result),
            Self::Failed(failure) => Err(failure),
        }
    }
}

/// Tracks the current state, logs and notifies the observer on each move
struct Lifecycle<'a, F> {
    state: TransactionState,
    hash: Option<String>,
    logger: &'a TransactionLogger,
    observer: F,
    started: Instant,
}

impl<'a, F: FnMut(TransactionState)> Lifecycle<'a, F> {
    fn new(logger: &'a TransactionLogger, observer: F) -> Self {
        Self {
            state: TransactionState::Built,
            hash: None,
            logger,
            observer,
            started: Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn advance(&mut self, next: TransactionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        self.logger
            .log_transition(self.state, next, self.hash.as_deref());
        self.state = next;
        (self.observer)(next);
    }

    fn fail(&mut self, mut failure: TransactionFailure) -> TransactionOutcome {
        if failure.hash.is_none() {
            failure.hash = self.hash.clone();
        }
        self.advance(TransactionState::Failed);
        self.logger.log_failed(
            failure.kind,
            failure.hash.as_deref(),
            &failure.message,
            self.elapsed_ms(),
        );
        TransactionOutcome::Failed(failure)
    }
}

/// Submits descriptors and awaits their finality
pub struct TransactionRunner<C> {
    chain: C,
    config: RunnerConfig,
}

impl<C: ChainClient> TransactionRunner<C> {
    pub fn new(chain: C, config: RunnerConfig) -> Self {
        Self { chain, config }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Submit `descriptor` through the context's wallet and wait for finality
    pub async fn run(
        &self,
        ctx: &TransactionContext,
        descriptor: &TransactionDescriptor,
        options: Option<&SubmitOptions>,
    ) -> TransactionOutcome {
        self.run_observed(ctx, descriptor, options, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `observer` with every state entered
    /// after `Built`, in order
    pub async fn run_observed<F>(
        &self,
        ctx: &TransactionContext,
        descriptor: &TransactionDescriptor,
        options: Option<&SubmitOptions>,
        observer: F,
    ) -> TransactionOutcome
    where
        F: FnMut(TransactionState) + Send,
    {
        let logger = TransactionLogger::start();
        let function = descriptor.function().to_string();
        let account = ctx.signer_account.as_ref().map(|a| a.to_string());
        logger.log_built(&function, account.as_deref());

        let mut lifecycle = Lifecycle::new(&logger, observer);

        if account.is_none() {
            return lifecycle.fail(TransactionFailure::new(
                FailureKind::WalletUnavailable,
                "no wallet account connected",
            ));
        }

        lifecycle.advance(TransactionState::Submitted);
        let pending = match ctx.signer.sign_and_submit(descriptor, options).await {
            Ok(pending) => pending,
            Err(err) => return lifecycle.fail(err.into()),
        };
        logger.log_submitted(&pending.hash, lifecycle.elapsed_ms());

        lifecycle.hash = Some(pending.hash.clone());
        lifecycle.advance(TransactionState::Pending);

        match self.confirm(&pending.hash, &logger).await {
            Ok(result) => {
                lifecycle.advance(TransactionState::Confirmed);
                logger.log_confirmed(&result.hash, result.version, lifecycle.elapsed_ms());
                TransactionOutcome::Confirmed(result)
            }
            Err(failure) => lifecycle.fail(failure),
        }
    }

    /// Wait for an already-submitted transaction and fetch its record.
    ///
    /// A committed transaction that failed execution is returned as an
    /// `ExecutionFailed` failure carrying the fetched record.
    pub async fn await_confirmation(
        &self,
        hash: &str,
    ) -> Result<TransactionResult, TransactionFailure> {
        let logger = TransactionLogger::start();
        self.confirm(hash, &logger).await
    }

    async fn confirm(
        &self,
        hash: &str,
        logger: &TransactionLogger,
    ) -> Result<TransactionResult, TransactionFailure> {
        let wait = async {
            self.poll_until_committed(hash, logger).await?;
            self.chain.transaction_by_hash(hash).await.map_err(|e| {
                TransactionFailure::new(e.kind(), format!("fetching result: {}", e))
                    .with_hash(hash)
            })
        };
        let result = match tokio::time::timeout(self.config.confirmation_timeout, wait).await {
            Ok(fetched) => fetched?,
            Err(_) => {
                return Err(TransactionFailure::new(
                    FailureKind::Timeout,
                    format!(
                        "not confirmed within {}ms",
                        self.config.confirmation_timeout.as_millis()
                    ),
                )
                .with_hash(hash))
            }
        };

        if result.is_success() {
            Ok(result)
        } else {
            Err(TransactionFailure::execution_failed(result))
        }
    }

    async fn poll_until_committed(
        &self,
        hash: &str,
        logger: &TransactionLogger,
    ) -> Result<(), TransactionFailure> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.chain.transaction_status(hash).await {
                Ok(TransactionStatus::Committed { .. }) => return Ok(()),
                Ok(TransactionStatus::Pending) => logger.log_poll(hash, attempt),
                Err(e) if e.is_not_found() => logger.log_poll(hash, attempt),
                Err(e) => {
                    return Err(TransactionFailure::new(
                        e.kind(),
                        format!("polling status: {}", e),
                    )
                    .with_hash(hash))
                }
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
