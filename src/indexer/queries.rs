//! GraphQL documents for the named indexer queries
//!
//! Every list query filters `is_deleted: {_eq: false}` server-side.

pub const LISTINGS_TABLE: &str = "nft_marketplace_v2_current_nft_marketplace_listings";
pub const AUCTIONS_TABLE: &str = "nft_marketplace_v2_current_nft_marketplace_auctions";
pub const TOKEN_OFFERS_TABLE: &str = "nft_marketplace_v2_current_nft_marketplace_token_offers";
pub const COLLECTION_OFFERS_TABLE: &str =
    "nft_marketplace_v2_current_nft_marketplace_collection_offers";
pub const COLLECTIONS_TABLE: &str = "current_collections_v2";

pub const LISTINGS: &str = r#"
query Listings($contract_address: String!, $fee_schedule_id: String!) {
  nft_marketplace_v2_current_nft_marketplace_listings(
    where: {
      contract_address: { _eq: $contract_address }
      fee_schedule_id: { _eq: $fee_schedule_id }
      is_deleted: { _eq: false }
    }
    order_by: { last_transaction_timestamp: desc }
  ) {
    listing_id
    token_data_id
    collection_id
    fee_schedule_id
    seller
    price
    token_amount
    token_standard
    coin_type
    contract_address
    is_deleted
    last_transaction_timestamp
    current_token_data {
      token_name
      token_uri
      collection_id
    }
  }
}
"#;

pub const AUCTIONS: &str = r#"
query Auctions($contract_address: String!, $fee_schedule_id: String!) {
  nft_marketplace_v2_current_nft_marketplace_auctions(
    where: {
      contract_address: { _eq: $contract_address }
      fee_schedule_id: { _eq: $fee_schedule_id }
      is_deleted: { _eq: false }
    }
    order_by: { expiration_time: asc }
  ) {
    listing_id
    token_data_id
    collection_id
    fee_schedule_id
    seller
    starting_bid_price
    current_bid_price
    current_bidder
    buy_it_now_price
    expiration_time
    coin_type
    contract_address
    is_deleted
    current_token_data {
      token_name
      token_uri
      collection_id
    }
  }
}
"#;

pub const TOKEN_OFFERS: &str = r#"
query TokenOffers($token_data_id: String!) {
  nft_marketplace_v2_current_nft_marketplace_token_offers(
    where: {
      token_data_id: { _eq: $token_data_id }
      is_deleted: { _eq: false }
    }
    order_by: { price: desc }
  ) {
    offer_id
    token_data_id
    collection_id
    fee_schedule_id
    buyer
    price
    token_amount
    expiration_time
    coin_type
    contract_address
    is_deleted
  }
}
"#;

pub const COLLECTION_OFFERS: &str = r#"
query CollectionOffers($collection_id: String!) {
  nft_marketplace_v2_current_nft_marketplace_collection_offers(
    where: {
      collection_id: { _eq: $collection_id }
      is_deleted: { _eq: false }
    }
    order_by: { item_price: desc }
  ) {
    collection_offer_id
    collection_id
    fee_schedule_id
    buyer
    item_price
    remaining_token_amount
    expiration_time
    coin_type
    contract_address
    is_deleted
  }
}
"#;

pub const COLLECTION: &str = r#"
query Collection($collection_id: String!) {
  current_collections_v2(where: { collection_id: { _eq: $collection_id } }) {
    collection_id
    collection_name
    creator_address
    description
    uri
    current_supply
    max_supply
    total_minted_v2
    token_standard
  }
}
"#;

pub const LISTING: &str = r#"
query Listing($listing_id: String!) {
  nft_marketplace_v2_current_nft_marketplace_listings(
    where: { listing_id: { _eq: $listing_id } }
  ) {
    listing_id
    token_data_id
    collection_id
    fee_schedule_id
    seller
    price
    token_amount
    token_standard
    coin_type
    contract_address
    is_deleted
    last_transaction_timestamp
    current_token_data {
      token_name
      token_uri
      collection_id
    }
  }
}
"#;

pub const FLOOR_LISTINGS: &str = r#"
query FloorListings($collection_id: String!, $limit: Int!) {
  nft_marketplace_v2_current_nft_marketplace_listings(
    where: {
      collection_id: { _eq: $collection_id }
      is_deleted: { _eq: false }
    }
    order_by: { price: asc }
    limit: $limit
  ) {
    listing_id
    token_data_id
    collection_id
    fee_schedule_id
    seller
    price
    token_amount
    token_standard
    coin_type
    contract_address
    is_deleted
    last_transaction_timestamp
    current_token_data {
      token_name
      token_uri
      collection_id
    }
  }
}
"#;

/// One page of active listings for a contract, across fee schedules
pub const CONTRACT_LISTINGS: &str = r#"
query ContractListings($contract_address: String!, $limit: Int!, $offset: Int!) {
  nft_marketplace_v2_current_nft_marketplace_listings(
    where: {
      contract_address: { _eq: $contract_address }
      is_deleted: { _eq: false }
    }
    order_by: { listing_id: asc }
    limit: $limit
    offset: $offset
  ) {
    listing_id
    token_data_id
    collection_id
    fee_schedule_id
    seller
    price
    token_amount
    token_standard
    coin_type
    contract_address
    is_deleted
    last_transaction_timestamp
    current_token_data {
      token_name
      token_uri
      collection_id
    }
  }
}
"#;
