//! `coin_listing` payloads: fixed-price listings, auctions, purchase, bids

use super::address::Address;
use super::descriptor::{CoinType, MoveValue, TransactionDescriptor};
use super::marketplace::{MarketplacePayloads, TokenV1Id};
use serde::{Deserialize, Serialize};

const MODULE: &str = "coin_listing";

/// Auction parameters shared by the V1 and V2 entry points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionTerms {
    pub start_time: u64,
    pub starting_bid: u64,
    pub bid_increment: u64,
    pub auction_end_time: u64,
    pub minimum_bid_time_before_end: u64,
    #[serde(default)]
    pub buy_it_now_price: Option<u64>,
}

impl AuctionTerms {
    fn arguments(&self) -> [MoveValue; 6] {
        [
            MoveValue::U64(self.start_time),
            MoveValue::U64(self.starting_bid),
            MoveValue::U64(self.bid_increment),
            MoveValue::U64(self.auction_end_time),
            MoveValue::U64(self.minimum_bid_time_before_end),
            MoveValue::optional_u64(self.buy_it_now_price),
        ]
    }
}

impl MarketplacePayloads {
    /// List a V2 token (object) at a fixed price
    pub fn init_fixed_price(
        &self,
        object: &Address,
        fee_schedule: &Address,
        start_time: u64,
        price: u64,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            MODULE,
            "init_fixed_price",
            coin,
            vec![
                object.into(),
                fee_schedule.into(),
                start_time.into(),
                price.into(),
            ],
        )
    }

    /// List a V1 token at a fixed price
    pub fn init_fixed_price_for_tokenv1(
        &self,
        token: &TokenV1Id,
        fee_schedule: &Address,
        start_time: u64,
        price: u64,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        let mut arguments = token.arguments().to_vec();
        arguments.extend([
            MoveValue::from(fee_schedule),
            MoveValue::U64(start_time),
            MoveValue::U64(price),
        ]);
        self.coin_call(MODULE, "init_fixed_price_for_tokenv1", coin, arguments)
    }

    /// Auction a V2 token (object)
    pub fn init_auction(
        &self,
        object: &Address,
        fee_schedule: &Address,
        terms: &AuctionTerms,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        let mut arguments: Vec<MoveValue> = vec![object.into(), fee_schedule.into()];
        arguments.extend(terms.arguments());
        self.coin_call(MODULE, "init_auction", coin, arguments)
    }

    /// Auction a V1 token
    pub fn init_auction_for_tokenv1(
        &self,
        token: &TokenV1Id,
        fee_schedule: &Address,
        terms: &AuctionTerms,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        let mut arguments = token.arguments().to_vec();
        arguments.push(fee_schedule.into());
        arguments.extend(terms.arguments());
        self.coin_call(MODULE, "init_auction_for_tokenv1", coin, arguments)
    }

    /// Buy a fixed-price listing, or buy-it-now an auction
    pub fn purchase(&self, listing: &Address, coin: Option<&CoinType>) -> TransactionDescriptor {
        self.coin_call(MODULE, "purchase", coin, vec![listing.into()])
    }

    /// Cancel a fixed-price listing (seller only)
    pub fn end_fixed_price(
        &self,
        listing: &Address,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(MODULE, "end_fixed_price", coin, vec![listing.into()])
    }

    pub fn bid(
        &self,
        listing: &Address,
        bid_amount: u64,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            MODULE,
            "bid",
            coin,
            vec![listing.into(), bid_amount.into()],
        )
    }

    /// Settle an auction once its end time has passed
    pub fn complete_auction(
        &self,
        listing: &Address,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(MODULE, "complete_auction", coin, vec![listing.into()])
    }
}
