//! GraphQL indexer access
//!
//! The indexer keeps denormalized projections of marketplace state. This
//! module wraps the named queries the marketplace needs and decodes their
//! rows into flat records. Soft-deleted rows are filtered both in the query
//! and again after decoding.

pub mod client;
pub mod errors;
pub mod image;
pub mod queries;
pub mod types;

pub use client::{rank_collections, IndexerClient, DEFAULT_PAGE_SIZE};
pub use errors::IndexerError;
pub use image::ImageResolver;
pub use types::{
    Auction, CollectionMetadata, CollectionOffer, CollectionVolume, Listing, SoftDeleted,
    TokenOffer, TokenSummary,
};
