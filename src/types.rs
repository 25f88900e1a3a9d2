//! Common types shared by the chain client, runner and indexer

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Handle returned by the wallet once a transaction is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}

impl PendingTransaction {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

/// Where a transaction is in its lifecycle, as seen by the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// In the mempool, or not yet visible to this node
    Pending,
    /// Committed to a version; `success` reflects execution
    Committed { success: bool, vm_status: String },
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Execution outcome of a committed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Failure,
}

/// An event emitted by a committed transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub sequence_number: Option<u64>,
    #[serde(default)]
    pub data: Value,
}

/// A state change written by a committed transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    #[serde(rename = "type")]
    pub change_type: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub state_key_hash: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Finalized transaction record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionResult {
    pub hash: String,
    pub status: ExecutionStatus,
    pub vm_status: String,
    pub version: u64,
    pub gas_used: u64,
    pub events: Vec<ChainEvent>,
    pub changes: Vec<StateChange>,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    /// Events whose type contains `needle`, e.g. `"ListingPlaced"`
    pub fn events_of<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a ChainEvent> + 'a {
        self.events
            .iter()
            .filter(move |event| event.event_type.contains(needle))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Num(u64),
    Str(String),
}

impl NumOrString {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Num(n) => Ok(n),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected u64, got '{}'", s))),
        }
    }
}

/// Accept a u64 written either as a JSON number or a decimal string
pub(crate) fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    NumOrString::deserialize(deserializer)?.into_u64()
}

/// Optional variant of [`de_u64`]; `null` and absent fields become `None`
pub(crate) fn de_opt_u64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Option::<NumOrString>::deserialize(deserializer)?
        .map(NumOrString::into_u64)
        .transpose()
}
