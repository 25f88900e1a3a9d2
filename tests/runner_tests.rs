//! Transaction runner against in-process wallet and chain stubs

use async_trait::async_trait;
use nft_market_client::chain::{ChainClient, ChainError, ViewRequest};
use nft_market_client::payload::{Address, MarketplacePayloads, TransactionDescriptor};
use nft_market_client::runner::{
    SigningError, SubmitOptions, TransactionContext, TransactionOutcome, TransactionRunner,
    TransactionState, WalletSigner,
};
use nft_market_client::types::{
    ExecutionStatus, PendingTransaction, TransactionResult, TransactionStatus,
};
use nft_market_client::{FailureKind, RunnerConfig};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const HASH: &str = "0xfeed";

struct StubWallet {
    response: Result<PendingTransaction, SigningError>,
    calls: AtomicUsize,
}

impl StubWallet {
    fn returning(response: Result<PendingTransaction, SigningError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }

    fn ok() -> Arc<Self> {
        Self::returning(Ok(PendingTransaction::new(HASH)))
    }
}

#[async_trait]
impl WalletSigner for StubWallet {
    async fn sign_and_submit(
        &self,
        _descriptor: &TransactionDescriptor,
        _options: Option<&SubmitOptions>,
    ) -> Result<PendingTransaction, SigningError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Replays scripted status responses; the last one repeats forever
struct StubChain {
    statuses: Mutex<VecDeque<Result<TransactionStatus, ChainError>>>,
    result: TransactionResult,
    fetch_delay: Duration,
    polls: AtomicUsize,
}

impl StubChain {
    fn new(statuses: Vec<Result<TransactionStatus, ChainError>>, success: bool) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            result: result(success),
            fetch_delay: Duration::ZERO,
            polls: AtomicUsize::new(0),
        }
    }

    fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }
}

#[async_trait]
impl ChainClient for StubChain {
    async fn transaction_status(&self, _hash: &str) -> Result<TransactionStatus, ChainError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses.front().cloned().unwrap()
        }
    }

    async fn transaction_by_hash(&self, _hash: &str) -> Result<TransactionResult, ChainError> {
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        Ok(self.result.clone())
    }

    async fn view(&self, _request: &ViewRequest) -> Result<Vec<Value>, ChainError> {
        Ok(Vec::new())
    }
}

fn result(success: bool) -> TransactionResult {
    TransactionResult {
        hash: HASH.to_string(),
        status: if success {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failure
        },
        vm_status: if success {
            "Executed successfully".to_string()
        } else {
            "Move abort in 0xcc::coin_listing: EINSUFFICIENT_BALANCE(0x10001)".to_string()
        },
        version: 42,
        gas_used: 7,
        events: Vec::new(),
        changes: Vec::new(),
    }
}

fn committed(success: bool) -> Result<TransactionStatus, ChainError> {
    Ok(TransactionStatus::Committed {
        success,
        vm_status: String::new(),
    })
}

fn fast_config() -> RunnerConfig {
    RunnerConfig {
        poll_interval: Duration::from_millis(1),
        confirmation_timeout: Duration::from_secs(5),
    }
}

fn descriptor() -> TransactionDescriptor {
    let payloads = MarketplacePayloads::new(Address::parse("0xCC").unwrap());
    payloads.purchase(&Address::parse("0xAA").unwrap(), None)
}

fn context(wallet: Arc<StubWallet>) -> TransactionContext {
    TransactionContext::new(Address::parse("0xBB").unwrap(), wallet)
}

async fn run_recording(
    runner: &TransactionRunner<StubChain>,
    ctx: &TransactionContext,
) -> (TransactionOutcome, Vec<TransactionState>) {
    let mut seen = Vec::new();
    let outcome = runner
        .run_observed(ctx, &descriptor(), None, |state| seen.push(state))
        .await;
    (outcome, seen)
}

#[tokio::test]
async fn test_confirmed_run_walks_every_state() {
    let chain = StubChain::new(
        vec![
            Ok(TransactionStatus::Pending),
            Ok(TransactionStatus::Pending),
            committed(true),
        ],
        true,
    );
    let runner = TransactionRunner::new(chain, fast_config());
    let wallet = StubWallet::ok();

    let (outcome, seen) = run_recording(&runner, &context(wallet.clone())).await;

    assert_eq!(
        seen,
        vec![
            TransactionState::Submitted,
            TransactionState::Pending,
            TransactionState::Confirmed
        ]
    );
    assert_eq!(wallet.calls.load(Ordering::SeqCst), 1);
    assert_eq!(runner.chain().polls.load(Ordering::SeqCst), 3);
    let result = outcome.into_result().unwrap();
    assert_eq!(result.hash, HASH);
    assert_eq!(result.version, 42);
}

#[tokio::test]
async fn test_user_rejection_fails_without_polling() {
    let chain = StubChain::new(vec![committed(true)], true);
    let runner = TransactionRunner::new(chain, fast_config());
    let wallet = StubWallet::returning(Err(SigningError::Rejected("declined".to_string())));

    let (outcome, seen) = run_recording(&runner, &context(wallet)).await;

    assert_eq!(seen, vec![TransactionState::Submitted, TransactionState::Failed]);
    assert_eq!(outcome.failure_kind(), Some(FailureKind::UserRejected));
    assert_eq!(outcome.hash(), None);
    assert_eq!(runner.chain().polls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_account_never_reaches_wallet() {
    let chain = StubChain::new(vec![committed(true)], true);
    let runner = TransactionRunner::new(chain, fast_config());
    let wallet = StubWallet::ok();
    let ctx = TransactionContext::disconnected(wallet.clone());

    let (outcome, seen) = run_recording(&runner, &ctx).await;

    assert_eq!(seen, vec![TransactionState::Failed]);
    assert_eq!(outcome.failure_kind(), Some(FailureKind::WalletUnavailable));
    assert_eq!(wallet.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wallet_network_error_is_network_kind() {
    let chain = StubChain::new(vec![committed(true)], true);
    let runner = TransactionRunner::new(chain, fast_config());
    let wallet = StubWallet::returning(Err(SigningError::Network("offline".to_string())));

    let outcome = runner.run(&context(wallet), &descriptor(), None).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Network));
}

#[tokio::test]
async fn test_onchain_abort_carries_result() {
    let chain = StubChain::new(vec![committed(false)], false);
    let runner = TransactionRunner::new(chain, fast_config());

    let (outcome, seen) = run_recording(&runner, &context(StubWallet::ok())).await;

    assert_eq!(seen.last(), Some(&TransactionState::Failed));
    let failure = outcome.into_result().unwrap_err();
    assert_eq!(failure.kind, FailureKind::ExecutionFailed);
    assert_eq!(failure.hash.as_deref(), Some(HASH));
    assert!(failure.message.contains("EINSUFFICIENT_BALANCE"));
    assert_eq!(failure.result.unwrap().version, 42);
}

#[tokio::test]
async fn test_not_found_is_treated_as_pending() {
    let chain = StubChain::new(
        vec![
            Err(ChainError::NotFound {
                what: "transaction 0xfeed".to_string(),
            }),
            committed(true),
        ],
        true,
    );
    let runner = TransactionRunner::new(chain, fast_config());

    let outcome = runner.run(&context(StubWallet::ok()), &descriptor(), None).await;

    assert!(outcome.is_confirmed());
}

#[tokio::test]
async fn test_poll_transport_error_fails_as_network() {
    let chain = StubChain::new(
        vec![Err(ChainError::Transport {
            endpoint: "http://node".to_string(),
            message: "connection refused".to_string(),
        })],
        true,
    );
    let runner = TransactionRunner::new(chain, fast_config());

    let outcome = runner.run(&context(StubWallet::ok()), &descriptor(), None).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Network));
    assert_eq!(outcome.hash(), Some(HASH));
}

#[tokio::test(start_paused = true)]
async fn test_never_committed_times_out() {
    let chain = StubChain::new(vec![Ok(TransactionStatus::Pending)], true);
    let runner = TransactionRunner::new(
        chain,
        RunnerConfig {
            poll_interval: Duration::from_millis(500),
            confirmation_timeout: Duration::from_secs(3),
        },
    );

    let (outcome, seen) = run_recording(&runner, &context(StubWallet::ok())).await;

    assert_eq!(
        seen,
        vec![
            TransactionState::Submitted,
            TransactionState::Pending,
            TransactionState::Failed
        ]
    );
    assert_eq!(outcome.failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(outcome.hash(), Some(HASH));
    let polls = runner.chain().polls.load(Ordering::SeqCst);
    assert!((6..=7).contains(&polls), "polled {} times", polls);
}

#[tokio::test(start_paused = true)]
async fn test_slow_result_fetch_counts_against_timeout() {
    let chain =
        StubChain::new(vec![committed(true)], true).with_fetch_delay(Duration::from_secs(60));
    let runner = TransactionRunner::new(
        chain,
        RunnerConfig {
            poll_interval: Duration::from_millis(500),
            confirmation_timeout: Duration::from_secs(3),
        },
    );

    let (outcome, seen) = run_recording(&runner, &context(StubWallet::ok())).await;

    assert_eq!(seen.last(), Some(&TransactionState::Failed));
    assert_eq!(outcome.failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(outcome.hash(), Some(HASH));
    assert_eq!(runner.chain().polls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_await_confirmation_without_wallet() {
    let chain = StubChain::new(vec![Ok(TransactionStatus::Pending), committed(true)], true);
    let runner = TransactionRunner::new(chain, fast_config());

    let result = runner.await_confirmation(HASH).await.unwrap();

    assert_eq!(result.gas_used, 7);
    assert!(result.is_success());
}
