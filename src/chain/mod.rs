//! Node REST API access
//!
//! [`ChainClient`] is the seam between the transaction runner / view layer
//! and the network. [`RestClient`] is the `reqwest` implementation; tests
//! substitute in-process stubs.

pub mod errors;
pub mod rest;
pub mod views;

pub use errors::ChainError;
pub use rest::RestClient;
pub use views::MarketplaceViews;

use crate::payload::{EntryFunctionId, MoveValue};
use crate::types::{TransactionResult, TransactionStatus};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Body of `POST /view`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRequest {
    pub function: EntryFunctionId,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    pub fn new(function: EntryFunctionId) -> Self {
        Self {
            function,
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }

    pub fn type_argument(mut self, type_argument: impl Into<String>) -> Self {
        self.type_arguments.push(type_argument.into());
        self
    }

    /// Append an argument in its JSON wire form
    pub fn argument(mut self, value: impl Into<MoveValue>) -> Self {
        self.arguments.push(value.into().to_json());
        self
    }
}

/// Read access to a fullnode
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current status of a submitted transaction.
    ///
    /// Returns `ChainError::NotFound` while the node has not seen the hash.
    async fn transaction_status(&self, hash: &str) -> Result<TransactionStatus, ChainError>;

    /// Full record of a committed transaction
    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionResult, ChainError>;

    /// Call a view function; returns the decoded JSON result list
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, ChainError>;
}

#[async_trait]
impl<T: ChainClient + ?Sized> ChainClient for Arc<T> {
    async fn transaction_status(&self, hash: &str) -> Result<TransactionStatus, ChainError> {
        (**self).transaction_status(hash).await
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionResult, ChainError> {
        (**self).transaction_by_hash(hash).await
    }

    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, ChainError> {
        (**self).view(request).await
    }
}
