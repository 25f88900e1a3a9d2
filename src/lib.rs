//! NFT marketplace client library
//!
//! Three independent parts:
//! - [`payload`]: builds entry-function call descriptors for the marketplace contract
//! - [`runner`]: submits a descriptor through a wallet and tracks it to finality
//! - [`chain`] and [`indexer`]: read-only access to fullnode views and the GraphQL indexer

pub mod chain;
pub mod config;
pub mod error;
pub mod indexer;
pub mod payload;
pub mod runner;
pub mod structured_logging;
pub mod types;

pub use chain::{ChainClient, ChainError, MarketplaceViews, RestClient, ViewRequest};
pub use config::{Config, ConfigError, Network};
pub use error::FailureKind;
pub use indexer::{ImageResolver, IndexerClient, IndexerError};
pub use payload::{
    Address, CoinType, MarketplacePayloads, PayloadError, PayloadRequest, TransactionDescriptor,
};
pub use runner::{
    RunnerConfig, TransactionContext, TransactionFailure, TransactionOutcome, TransactionRunner,
    TransactionState, WalletSigner,
};
pub use types::{TransactionResult, TransactionStatus};
