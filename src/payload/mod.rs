//! Payload builder
//!
//! Pure mapping from a marketplace operation and its typed inputs to a
//! [`TransactionDescriptor`]. No I/O happens here and nothing is validated
//! against the chain: argument order and count follow the target entry
//! function's parameter list, and a mismatch only shows up as a remote
//! rejection when the transaction is submitted.
//!
//! ## Layout
//!
//! - `address`: address parsing and canonical form
//! - `descriptor`: entry function ids, coin types, typed arguments
//! - `marketplace`: [`MarketplacePayloads`], bound to one contract address
//! - `listing`, `offers`, `fee_schedule`: marketplace operations
//! - `token`: framework token-standard calls (create, mint, transfer)
//! - `form`: [`ListingForm`] and the tagged [`PayloadRequest`]
//! - `signatures`: reference table of every targeted entry function

pub mod address;
pub mod descriptor;
pub mod errors;
pub mod fee_schedule;
pub mod form;
pub mod listing;
pub mod marketplace;
pub mod offers;
pub mod signatures;
pub mod token;

pub use address::{normalize_address, Address};
pub use descriptor::{
    CoinType, EntryFunctionId, MoveValue, TransactionDescriptor, APTOS_COIN, OBJECT_CORE,
};
pub use errors::PayloadError;
pub use fee_schedule::FeeScheduleTerms;
pub use form::{AuctionInput, ListingForm, ListingKind, PayloadRequest};
pub use listing::AuctionTerms;
pub use marketplace::{MarketplacePayloads, TokenV1Id};
pub use offers::OfferTerms;
pub use signatures::{EntrySignature, ModuleHost, SIGNATURES};
