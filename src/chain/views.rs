//! Marketplace view functions
//!
//! Request builders plus typed fetchers over any [`ChainClient`]. View
//! results come back as a JSON list; `u64` values are decimal strings,
//! `Option<T>` is `{"vec": [..]}` and objects are `{"inner": "0x.."}`.

use super::{ChainClient, ChainError, ViewRequest};
use crate::payload::{Address, CoinType, EntryFunctionId};
use serde_json::Value;

/// Decode a `u64` view result
pub fn decode_u64(value: &Value) -> Result<u64, ChainError> {
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|_| ChainError::Decode(format!("expected u64, got '{}'", s))),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| ChainError::Decode(format!("expected u64, got {}", n))),
        other => Err(ChainError::Decode(format!("expected u64, got {}", other))),
    }
}

fn option_inner(value: &Value) -> Result<Option<&Value>, ChainError> {
    let vec = value
        .get("vec")
        .and_then(Value::as_array)
        .ok_or_else(|| ChainError::Decode(format!("expected option, got {}", value)))?;
    match vec.as_slice() {
        [] => Ok(None),
        [inner] => Ok(Some(inner)),
        _ => Err(ChainError::Decode(format!(
            "option holds {} values",
            vec.len()
        ))),
    }
}

/// Decode an `Option<u64>` view result
pub fn decode_option_u64(value: &Value) -> Result<Option<u64>, ChainError> {
    option_inner(value)?.map(decode_u64).transpose()
}

/// Decode an address, or an object reference (`{"inner": address}`)
pub fn decode_address(value: &Value) -> Result<Address, ChainError> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map
            .get("inner")
            .and_then(Value::as_str)
            .ok_or_else(|| ChainError::Decode(format!("expected object ref, got {}", value)))?,
        other => return Err(ChainError::Decode(format!("expected address, got {}", other))),
    };
    Address::parse(raw).map_err(|e| ChainError::Decode(e.to_string()))
}

/// Decode an `Option<address>` view result
pub fn decode_option_address(value: &Value) -> Result<Option<Address>, ChainError> {
    option_inner(value)?.map(decode_address).transpose()
}

fn first(values: &[Value]) -> Result<&Value, ChainError> {
    values
        .first()
        .ok_or_else(|| ChainError::Decode("view returned no values".to_string()))
}

/// View-function access for one marketplace deployment
#[derive(Debug, Clone)]
pub struct MarketplaceViews {
    contract: Address,
    coin: CoinType,
}

impl MarketplaceViews {
    pub fn new(contract: Address, coin: CoinType) -> Self {
        Self { contract, coin }
    }

    fn function(&self, module: &str, name: &str) -> ViewRequest {
        ViewRequest::new(EntryFunctionId {
            address: self.contract.clone(),
            module: module.to_string(),
            name: name.to_string(),
        })
    }

    fn coin_function(&self, name: &str) -> ViewRequest {
        self.function("coin_listing", name)
            .type_argument(self.coin.as_str())
    }

    pub fn seller_request(&self, listing: &Address) -> ViewRequest {
        self.function("listing", "seller").argument(listing)
    }

    pub fn listed_object_request(&self, listing: &Address) -> ViewRequest {
        self.function("listing", "listed_object").argument(listing)
    }

    pub fn price_request(&self, listing: &Address) -> ViewRequest {
        self.coin_function("price").argument(listing)
    }

    pub fn current_amount_request(&self, listing: &Address) -> ViewRequest {
        self.coin_function("current_amount").argument(listing)
    }

    pub fn current_bidder_request(&self, listing: &Address) -> ViewRequest {
        self.coin_function("current_bidder").argument(listing)
    }

    pub fn auction_end_time_request(&self, listing: &Address) -> ViewRequest {
        self.coin_function("auction_end_time").argument(listing)
    }

    pub fn commission_request(&self, fee_schedule: &Address, price: u64) -> ViewRequest {
        self.function("fee_schedule", "commission")
            .argument(fee_schedule)
            .argument(price)
    }

    pub fn listing_fee_request(&self, fee_schedule: &Address, base: u64) -> ViewRequest {
        self.function("fee_schedule", "listing_fee")
            .argument(fee_schedule)
            .argument(base)
    }

    pub fn bidding_fee_request(&self, fee_schedule: &Address, bid: u64) -> ViewRequest {
        self.function("fee_schedule", "bidding_fee")
            .argument(fee_schedule)
            .argument(bid)
    }

    pub fn fee_address_request(&self, fee_schedule: &Address) -> ViewRequest {
        self.function("fee_schedule", "fee_address")
            .argument(fee_schedule)
    }

    pub async fn seller<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        listing: &Address,
    ) -> Result<Address, ChainError> {
        let values = client.view(&self.seller_request(listing)).await?;
        decode_address(first(&values)?)
    }

    pub async fn listed_object<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        listing: &Address,
    ) -> Result<Address, ChainError> {
        let values = client.view(&self.listed_object_request(listing)).await?;
        decode_address(first(&values)?)
    }

    /// Fixed price, or buy-it-now price for auctions; `None` if unset
    pub async fn price<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        listing: &Address,
    ) -> Result<Option<u64>, ChainError> {
        let values = client.view(&self.price_request(listing)).await?;
        decode_option_u64(first(&values)?)
    }

    /// Highest bid so far, or the starting bid when there is none
    pub async fn current_amount<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        listing: &Address,
    ) -> Result<Option<u64>, ChainError> {
        let values = client.view(&self.current_amount_request(listing)).await?;
        decode_option_u64(first(&values)?)
    }

    pub async fn current_bidder<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        listing: &Address,
    ) -> Result<Option<Address>, ChainError> {
        let values = client.view(&self.current_bidder_request(listing)).await?;
        decode_option_address(first(&values)?)
    }

    pub async fn auction_end_time<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        listing: &Address,
    ) -> Result<u64, ChainError> {
        let values = client.view(&self.auction_end_time_request(listing)).await?;
        decode_u64(first(&values)?)
    }

    pub async fn commission<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        fee_schedule: &Address,
        price: u64,
    ) -> Result<u64, ChainError> {
        let values = client
            .view(&self.commission_request(fee_schedule, price))
            .await?;
        decode_u64(first(&values)?)
    }

    pub async fn listing_fee<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        fee_schedule: &Address,
        base: u64,
    ) -> Result<u64, ChainError> {
        let values = client
            .view(&self.listing_fee_request(fee_schedule, base))
            .await?;
        decode_u64(first(&values)?)
    }

    pub async fn bidding_fee<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        fee_schedule: &Address,
        bid: u64,
    ) -> Result<u64, ChainError> {
        let values = client
            .view(&self.bidding_fee_request(fee_schedule, bid))
            .await?;
        decode_u64(first(&values)?)
    }

    pub async fn fee_address<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        fee_schedule: &Address,
    ) -> Result<Address, ChainError> {
        let values = client.view(&self.fee_address_request(fee_schedule)).await?;
        decode_address(first(&values)?)
    }
}
