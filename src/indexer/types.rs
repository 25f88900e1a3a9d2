//! Query projections
//!
//! Flat records decoded straight from indexer rows. Numeric columns may
//! arrive as JSON numbers or as strings depending on the column type, so
//! every amount goes through the lenient `u64` decoder.

use crate::types::{de_opt_u64, de_u64};
use serde::{Deserialize, Serialize};

/// Rows that carry the soft-delete flag
pub trait SoftDeleted {
    fn is_deleted(&self) -> bool;
}

/// Token fields joined onto listings and offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
}

/// A fixed-price listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: String,
    #[serde(default)]
    pub token_data_id: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    pub fee_schedule_id: String,
    pub seller: String,
    #[serde(deserialize_with = "de_u64")]
    pub price: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub token_amount: Option<u64>,
    #[serde(default)]
    pub token_standard: Option<String>,
    #[serde(default)]
    pub coin_type: Option<String>,
    pub contract_address: String,
    pub is_deleted: bool,
    #[serde(default)]
    pub last_transaction_timestamp: Option<String>,
    #[serde(default)]
    pub current_token_data: Option<TokenSummary>,
}

impl Listing {
    /// Collection id from the row, or from the joined token data
    pub fn collection(&self) -> Option<&str> {
        self.collection_id.as_deref().or_else(|| {
            self.current_token_data
                .as_ref()
                .and_then(|t| t.collection_id.as_deref())
        })
    }
}

/// An auction listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub listing_id: String,
    #[serde(default)]
    pub token_data_id: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    pub fee_schedule_id: String,
    pub seller: String,
    #[serde(deserialize_with = "de_u64")]
    pub starting_bid_price: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub current_bid_price: Option<u64>,
    #[serde(default)]
    pub current_bidder: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub buy_it_now_price: Option<u64>,
    #[serde(deserialize_with = "de_u64")]
    pub expiration_time: u64,
    #[serde(default)]
    pub coin_type: Option<String>,
    pub contract_address: String,
    pub is_deleted: bool,
    #[serde(default)]
    pub current_token_data: Option<TokenSummary>,
}

/// An offer on one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOffer {
    pub offer_id: String,
    pub token_data_id: String,
    #[serde(default)]
    pub collection_id: Option<String>,
    pub fee_schedule_id: String,
    pub buyer: String,
    #[serde(deserialize_with = "de_u64")]
    pub price: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub token_amount: Option<u64>,
    #[serde(deserialize_with = "de_u64")]
    pub expiration_time: u64,
    #[serde(default)]
    pub coin_type: Option<String>,
    pub contract_address: String,
    pub is_deleted: bool,
}

/// An offer on any token of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOffer {
    pub collection_offer_id: String,
    pub collection_id: String,
    pub fee_schedule_id: String,
    pub buyer: String,
    #[serde(deserialize_with = "de_u64")]
    pub item_price: u64,
    #[serde(deserialize_with = "de_u64")]
    pub remaining_token_amount: u64,
    #[serde(deserialize_with = "de_u64")]
    pub expiration_time: u64,
    #[serde(default)]
    pub coin_type: Option<String>,
    pub contract_address: String,
    pub is_deleted: bool,
}

/// Collection metadata from `current_collections_v2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub collection_id: String,
    pub collection_name: String,
    pub creator_address: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub current_supply: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub max_supply: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub total_minted_v2: Option<u64>,
    #[serde(default)]
    pub token_standard: Option<String>,
}

/// Aggregate of active listings in one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionVolume {
    pub collection_id: String,
    pub listing_count: usize,
    /// Sum of active listing prices
    pub total_volume: u128,
    pub floor_price: u64,
}

macro_rules! soft_deleted {
    ($($ty:ty),* $(,)?) => {
        $(impl SoftDeleted for $ty {
            fn is_deleted(&self) -> bool {
                self.is_deleted
            }
        })*
    };
}

soft_deleted!(Listing, Auction, TokenOffer, CollectionOffer);
