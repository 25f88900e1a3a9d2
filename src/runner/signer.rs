//! Wallet signing capability
//!
//! The library never holds keys. Whatever connects to the user's wallet
//! implements [`WalletSigner`] and is handed to the runner through a
//! [`TransactionContext`].

use super::errors::SigningError;
use crate::payload::{Address, TransactionDescriptor};
use crate::types::PendingTransaction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Optional submission parameters forwarded to the wallet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitOptions {
    pub max_gas_amount: Option<u64>,
    pub gas_unit_price: Option<u64>,
    /// Absolute expiration, seconds since the epoch
    pub expiration_timestamp_secs: Option<u64>,
}

/// Signs a descriptor and submits it to the network
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn sign_and_submit(
        &self,
        descriptor: &TransactionDescriptor,
        options: Option<&SubmitOptions>,
    ) -> Result<PendingTransaction, SigningError>;
}

/// The connected account plus its signing capability
#[derive(Clone)]
pub struct TransactionContext {
    /// `None` when no wallet account is connected
    pub signer_account: Option<Address>,
    pub signer: Arc<dyn WalletSigner>,
}

impl TransactionContext {
    pub fn new(signer_account: Address, signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            signer_account: Some(signer_account),
            signer,
        }
    }

    /// A context with no connected account; every run fails fast
    pub fn disconnected(signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            signer_account: None,
            signer,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.signer_account.is_some()
    }
}

impl fmt::Debug for TransactionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionContext")
            .field("signer_account", &self.signer_account)
            .finish_non_exhaustive()
    }
}
