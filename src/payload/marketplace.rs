//! Marketplace-scoped payloads
//!
//! [`MarketplacePayloads`] knows the address the marketplace contract is
//! published at and the default settlement coin. Operations live in the
//! sibling modules (`listing`, `offers`, `fee_schedule`) as `impl` blocks.

use super::address::Address;
use super::descriptor::{CoinType, EntryFunctionId, MoveValue, TransactionDescriptor};
use super::errors::PayloadError;
use serde::{Deserialize, Serialize};

/// Identifies a token under the V1 standard (creator + collection + name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenV1Id {
    pub creator: Address,
    pub collection: String,
    pub name: String,
    #[serde(default)]
    pub property_version: u64,
}

impl TokenV1Id {
    pub fn new(
        creator: Address,
        collection: impl Into<String>,
        name: impl Into<String>,
        property_version: u64,
    ) -> Self {
        Self {
            creator,
            collection: collection.into(),
            name: name.into(),
            property_version,
        }
    }

    /// The four leading arguments every V1 entry point takes, in order
    pub(crate) fn arguments(&self) -> [MoveValue; 4] {
        [
            MoveValue::Address(self.creator.clone()),
            MoveValue::String(self.collection.clone()),
            MoveValue::String(self.name.clone()),
            MoveValue::U64(self.property_version),
        ]
    }
}

/// Payload factory bound to one marketplace deployment
#[derive(Debug, Clone)]
pub struct MarketplacePayloads {
    contract: Address,
    default_coin: CoinType,
}

impl MarketplacePayloads {
    /// Bind to a contract address, settling in AptosCoin by default
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            default_coin: CoinType::aptos_coin(),
        }
    }

    /// Parse the contract address from a string
    pub fn from_address_str(contract: &str) -> Result<Self, PayloadError> {
        Ok(Self::new(Address::parse(contract)?))
    }

    /// Override the coin used when callers omit one
    pub fn with_default_coin(mut self, coin: CoinType) -> Self {
        self.default_coin = coin;
        self
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }

    pub fn default_coin(&self) -> &CoinType {
        &self.default_coin
    }

    pub(crate) fn function(&self, module: &str, name: &str) -> EntryFunctionId {
        EntryFunctionId {
            address: self.contract.clone(),
            module: module.to_string(),
            name: name.to_string(),
        }
    }

    /// Coin-denominated call: the coin type is the sole type argument
    pub(crate) fn coin_call(
        &self,
        module: &str,
        name: &str,
        coin: Option<&CoinType>,
        arguments: Vec<MoveValue>,
    ) -> TransactionDescriptor {
        let coin = CoinType::or_default(coin, &self.default_coin);
        TransactionDescriptor::new(
            self.function(module, name),
            vec![coin.to_string()],
            arguments,
        )
    }

    /// Call with no type arguments
    pub(crate) fn plain_call(
        &self,
        module: &str,
        name: &str,
        arguments: Vec<MoveValue>,
    ) -> TransactionDescriptor {
        TransactionDescriptor::new(self.function(module, name), Vec::new(), arguments)
    }
}
