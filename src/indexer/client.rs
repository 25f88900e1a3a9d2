use super::errors::IndexerError;
use super::queries;
use super::types::{
    Auction, CollectionMetadata, CollectionOffer, CollectionVolume, Listing, SoftDeleted,
    TokenOffer,
};
use crate::payload::Address;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// GraphQL indexer client
///
/// Queries are not retried; an error means the data is unavailable for now.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    endpoint: String,
    page_size: u32,
}

/// Row cap of the hosted indexer per response
pub const DEFAULT_PAGE_SIZE: u32 = 100;

impl IndexerClient {
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, IndexerError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| IndexerError::from_reqwest(e, endpoint))?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Reuse an existing connection pool
    pub fn with_client(http: reqwest::Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Rows requested per page by queries that walk a whole table
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `{query, variables}` and decode `data` into `T`
    pub async fn query<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<T, IndexerError> {
        debug!(endpoint = %self.endpoint, "Posting indexer query");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await
            .map_err(|e| IndexerError::from_reqwest(e, &self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IndexerError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| IndexerError::from_reqwest(e, &self.endpoint))?;

        if !body.errors.is_empty() {
            return Err(IndexerError::GraphQl(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        match body.data {
            Some(Value::Null) | None => Err(IndexerError::MissingData),
            Some(data) => {
                serde_json::from_value(data).map_err(|e| IndexerError::Decode(e.to_string()))
            }
        }
    }

    /// Run a query selecting one table and return its rows
    async fn rows<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        table: &str,
    ) -> Result<Vec<T>, IndexerError> {
        let mut data: HashMap<String, Vec<T>> = self.query(document, variables).await?;
        data.remove(table).ok_or(IndexerError::MissingData)
    }

    /// Rows with the soft-delete flag cleared
    async fn active_rows<T: DeserializeOwned + SoftDeleted>(
        &self,
        document: &str,
        variables: Value,
        table: &str,
    ) -> Result<Vec<T>, IndexerError> {
        let rows: Vec<T> = self.rows(document, variables, table).await?;
        let total = rows.len();
        let active: Vec<T> = rows.into_iter().filter(|row| !row.is_deleted()).collect();
        if active.len() != total {
            debug!(
                table = %table,
                dropped = total - active.len(),
                "Dropped deleted rows the indexer returned"
            );
        }
        Ok(active)
    }

    /// Active fixed-price listings for a contract and fee schedule
    pub async fn listings(
        &self,
        contract: &Address,
        fee_schedule: &Address,
    ) -> Result<Vec<Listing>, IndexerError> {
        self.active_rows(
            queries::LISTINGS,
            json!({
                "contract_address": contract.to_long_string(),
                "fee_schedule_id": fee_schedule.to_long_string(),
            }),
            queries::LISTINGS_TABLE,
        )
        .await
    }

    /// Active auctions for a contract and fee schedule
    pub async fn auctions(
        &self,
        contract: &Address,
        fee_schedule: &Address,
    ) -> Result<Vec<Auction>, IndexerError> {
        self.active_rows(
            queries::AUCTIONS,
            json!({
                "contract_address": contract.to_long_string(),
                "fee_schedule_id": fee_schedule.to_long_string(),
            }),
            queries::AUCTIONS_TABLE,
        )
        .await
    }

    /// Active offers on one token, best price first
    pub async fn token_offers(
        &self,
        token_data_id: &Address,
    ) -> Result<Vec<TokenOffer>, IndexerError> {
        self.active_rows(
            queries::TOKEN_OFFERS,
            json!({ "token_data_id": token_data_id.to_long_string() }),
            queries::TOKEN_OFFERS_TABLE,
        )
        .await
    }

    /// Active offers on a collection, best price first
    pub async fn collection_offers(
        &self,
        collection_id: &Address,
    ) -> Result<Vec<CollectionOffer>, IndexerError> {
        self.active_rows(
            queries::COLLECTION_OFFERS,
            json!({ "collection_id": collection_id.to_long_string() }),
            queries::COLLECTION_OFFERS_TABLE,
        )
        .await
    }

    pub async fn collection(
        &self,
        collection_id: &Address,
    ) -> Result<Option<CollectionMetadata>, IndexerError> {
        let rows: Vec<CollectionMetadata> = self
            .rows(
                queries::COLLECTION,
                json!({ "collection_id": collection_id.to_long_string() }),
                queries::COLLECTIONS_TABLE,
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Listing detail by id; deleted (sold or cancelled) listings are returned too
    pub async fn listing(&self, listing_id: &Address) -> Result<Option<Listing>, IndexerError> {
        let rows: Vec<Listing> = self
            .rows(
                queries::LISTING,
                json!({ "listing_id": listing_id.to_long_string() }),
                queries::LISTINGS_TABLE,
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Cheapest active listings in a collection
    pub async fn floor_listings(
        &self,
        collection_id: &Address,
        limit: u32,
    ) -> Result<Vec<Listing>, IndexerError> {
        let mut rows: Vec<Listing> = self
            .active_rows(
                queries::FLOOR_LISTINGS,
                json!({
                    "collection_id": collection_id.to_long_string(),
                    "limit": limit,
                }),
                queries::LISTINGS_TABLE,
            )
            .await?;
        rows.sort_by_key(|listing| listing.price);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    /// Collections ranked by the summed price of their active listings
    pub async fn top_collections(
        &self,
        contract: &Address,
        limit: usize,
    ) -> Result<Vec<CollectionVolume>, IndexerError> {
        let contract_address = contract.to_long_string();
        let mut listings: Vec<Listing> = Vec::new();
        let mut offset: u64 = 0;
        loop {
            let page: Vec<Listing> = self
                .rows(
                    queries::CONTRACT_LISTINGS,
                    json!({
                        "contract_address": contract_address,
                        "limit": self.page_size,
                        "offset": offset,
                    }),
                    queries::LISTINGS_TABLE,
                )
                .await?;
            let fetched = page.len();
            listings.extend(page);
            if fetched < self.page_size as usize {
                break;
            }
            offset += fetched as u64;
        }
        debug!(
            contract = %contract_address,
            listings = listings.len(),
            "Fetched contract listings for ranking"
        );
        Ok(rank_collections(&listings, limit))
    }
}

/// Aggregate listings per collection, highest volume first
pub fn rank_collections(listings: &[Listing], limit: usize) -> Vec<CollectionVolume> {
    let mut by_collection: HashMap<&str, CollectionVolume> = HashMap::new();
    for listing in listings.iter().filter(|l| !l.is_deleted()) {
        let Some(collection_id) = listing.collection() else {
            continue;
        };
        let entry = by_collection
            .entry(collection_id)
            .or_insert_with(|| CollectionVolume {
                collection_id: collection_id.to_string(),
                listing_count: 0,
                total_volume: 0,
                floor_price: listing.price,
            });
        entry.listing_count += 1;
        entry.total_volume += u128::from(listing.price);
        entry.floor_price = entry.floor_price.min(listing.price);
    }

    let mut ranked: Vec<CollectionVolume> = by_collection.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_volume
            .cmp(&a.total_volume)
            .then_with(|| a.collection_id.cmp(&b.collection_id))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, collection: Option<&str>, price: u64, deleted: bool) -> Listing {
        Listing {
            listing_id: id.to_string(),
            token_data_id: None,
            collection_id: collection.map(str::to_string),
            fee_schedule_id: "0xDD".to_string(),
            seller: "0x1".to_string(),
            price,
            token_amount: Some(1),
            token_standard: Some("v2".to_string()),
            coin_type: None,
            contract_address: "0xCC".to_string(),
            is_deleted: deleted,
            last_transaction_timestamp: None,
            current_token_data: None,
        }
    }

    #[test]
    fn test_rank_collections() {
        let listings = vec![
            listing("1", Some("a"), 100, false),
            listing("2", Some("a"), 50, false),
            listing("3", Some("b"), 500, false),
            listing("4", Some("b"), 1_000, true),
            listing("5", None, 9_999, false),
            listing("6", Some("c"), 10, false),
        ];
        let ranked = rank_collections(&listings, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].collection_id, "b");
        assert_eq!(ranked[0].total_volume, 500);
        assert_eq!(ranked[0].listing_count, 1);
        assert_eq!(ranked[1].collection_id, "a");
        assert_eq!(ranked[1].total_volume, 150);
        assert_eq!(ranked[1].floor_price, 50);
    }

    #[test]
    fn test_rank_collections_ties_break_by_id() {
        let listings = vec![
            listing("1", Some("z"), 10, false),
            listing("2", Some("y"), 10, false),
        ];
        let ranked = rank_collections(&listings, 10);
        assert_eq!(ranked[0].collection_id, "y");
        assert_eq!(ranked[1].collection_id, "z");
    }
}
