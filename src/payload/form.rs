//! Form-level entry points
//!
//! [`ListingForm`] is the single parameterized way to create a listing from
//! what a user typed. [`PayloadRequest`] covers every supported operation in
//! one serde-tagged enum so a request can be read from JSON and dispatched.

use super::address::Address;
use super::descriptor::{CoinType, TransactionDescriptor};
use super::errors::PayloadError;
use super::fee_schedule::FeeScheduleTerms;
use super::listing::AuctionTerms;
use super::marketplace::{MarketplacePayloads, TokenV1Id};
use super::offers::OfferTerms;
use super::token::{self, CollectionV1, CollectionV2, TokenV1, TokenV2};
use serde::{Deserialize, Serialize};

/// Auction inputs; the start time comes from the enclosing form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionInput {
    pub starting_bid: u64,
    pub bid_increment: u64,
    pub auction_end_time: u64,
    pub minimum_bid_time_before_end: u64,
    #[serde(default)]
    pub buy_it_now_price: Option<u64>,
}

impl AuctionInput {
    fn terms(&self, start_time: u64) -> AuctionTerms {
        AuctionTerms {
            start_time,
            starting_bid: self.starting_bid,
            bid_increment: self.bid_increment,
            auction_end_time: self.auction_end_time,
            minimum_bid_time_before_end: self.minimum_bid_time_before_end,
            buy_it_now_price: self.buy_it_now_price,
        }
    }
}

/// What is being listed and how it sells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingKind {
    FixedV1 {
        creator: String,
        collection: String,
        name: String,
        #[serde(default)]
        property_version: u64,
        price: u64,
    },
    AuctionV1 {
        creator: String,
        collection: String,
        name: String,
        #[serde(default)]
        property_version: u64,
        auction: AuctionInput,
    },
    FixedV2 {
        object: String,
        price: u64,
    },
    AuctionV2 {
        object: String,
        auction: AuctionInput,
    },
}

/// A listing as entered by a user
///
/// Address and coin fields are raw strings; they are validated when the
/// form is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingForm {
    #[serde(flatten)]
    pub kind: ListingKind,
    pub fee_schedule: String,
    #[serde(default)]
    pub start_time: u64,
    #[serde(default)]
    pub coin_type: Option<String>,
}

impl ListingForm {
    /// Validate the raw fields and produce the matching `coin_listing` call
    pub fn build(
        &self,
        payloads: &MarketplacePayloads,
    ) -> Result<TransactionDescriptor, PayloadError> {
        let fee_schedule = Address::parse(&self.fee_schedule)?;
        let coin = self
            .coin_type
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(CoinType::parse)
            .transpose()?;
        let coin = coin.as_ref();

        let descriptor = match &self.kind {
            ListingKind::FixedV1 {
                creator,
                collection,
                name,
                property_version,
                price,
            } => {
                let creator = Address::parse(creator)?;
                let token = TokenV1Id::new(creator, collection, name, *property_version);
                payloads.init_fixed_price_for_tokenv1(
                    &token,
                    &fee_schedule,
                    self.start_time,
                    *price,
                    coin,
                )
            }
            ListingKind::AuctionV1 {
                creator,
                collection,
                name,
                property_version,
                auction,
            } => {
                let creator = Address::parse(creator)?;
                let token = TokenV1Id::new(creator, collection, name, *property_version);
                payloads.init_auction_for_tokenv1(
                    &token,
                    &fee_schedule,
                    &auction.terms(self.start_time),
                    coin,
                )
            }
            ListingKind::FixedV2 { object, price } => payloads.init_fixed_price(
                &Address::parse(object)?,
                &fee_schedule,
                self.start_time,
                *price,
                coin,
            ),
            ListingKind::AuctionV2 { object, auction } => payloads.init_auction(
                &Address::parse(object)?,
                &fee_schedule,
                &auction.terms(self.start_time),
                coin,
            ),
        };
        Ok(descriptor)
    }
}

/// Any supported operation, tagged by `op`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PayloadRequest {
    Listing(ListingForm),
    Purchase {
        listing: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    EndFixedPrice {
        listing: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    Bid {
        listing: Address,
        amount: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    CompleteAuction {
        listing: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    TokenOfferV1 {
        token: TokenV1Id,
        fee_schedule: Address,
        item_price: u64,
        expiration_time: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    TokenOfferV2 {
        token: Address,
        fee_schedule: Address,
        item_price: u64,
        expiration_time: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    CancelTokenOffer {
        offer: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    FillTokenOfferV1 {
        offer: Address,
        token_name: String,
        #[serde(default)]
        property_version: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    FillTokenOfferV2 {
        offer: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    CollectionOfferV1 {
        creator: Address,
        collection_name: String,
        fee_schedule: Address,
        item_price: u64,
        amount: u64,
        expiration_time: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    CollectionOfferV2 {
        collection: Address,
        fee_schedule: Address,
        item_price: u64,
        amount: u64,
        expiration_time: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    CancelCollectionOffer {
        offer: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    FillCollectionOfferV1 {
        offer: Address,
        token_name: String,
        #[serde(default)]
        property_version: u64,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    FillCollectionOfferV2 {
        offer: Address,
        token: Address,
        #[serde(default)]
        coin_type: Option<CoinType>,
    },
    InitFeeSchedule(FeeScheduleTerms),
    SetFeeAddress {
        fee_schedule: Address,
        fee_address: Address,
    },
    SetListingFee {
        fee_schedule: Address,
        fee: u64,
    },
    SetBiddingFee {
        fee_schedule: Address,
        fee: u64,
    },
    SetFixedCommission {
        fee_schedule: Address,
        commission: u64,
    },
    SetPercentageCommission {
        fee_schedule: Address,
        denominator: u64,
        numerator: u64,
    },
    CreateCollectionV1(CollectionV1),
    MintV1(TokenV1),
    OfferTokenV1 {
        receiver: Address,
        token: TokenV1Id,
        #[serde(default = "one")]
        amount: u64,
    },
    CreateCollectionV2(CollectionV2),
    MintV2(TokenV2),
    TransferObject {
        object: Address,
        to: Address,
    },
}

fn one() -> u64 {
    1
}

impl PayloadRequest {
    pub fn build(
        &self,
        payloads: &MarketplacePayloads,
    ) -> Result<TransactionDescriptor, PayloadError> {
        let descriptor = match self {
            Self::Listing(form) => return form.build(payloads),
            Self::Purchase { listing, coin_type } => payloads.purchase(listing, coin_type.as_ref()),
            Self::EndFixedPrice { listing, coin_type } => {
                payloads.end_fixed_price(listing, coin_type.as_ref())
            }
            Self::Bid {
                listing,
                amount,
                coin_type,
            } => payloads.bid(listing, *amount, coin_type.as_ref()),
            Self::CompleteAuction { listing, coin_type } => {
                payloads.complete_auction(listing, coin_type.as_ref())
            }
            Self::TokenOfferV1 {
                token,
                fee_schedule,
                item_price,
                expiration_time,
                coin_type,
            } => payloads.init_token_offer_for_tokenv1(
                token,
                fee_schedule,
                OfferTerms {
                    item_price: *item_price,
                    expiration_time: *expiration_time,
                },
                coin_type.as_ref(),
            ),
            Self::TokenOfferV2 {
                token,
                fee_schedule,
                item_price,
                expiration_time,
                coin_type,
            } => payloads.init_token_offer_for_tokenv2(
                token,
                fee_schedule,
                OfferTerms {
                    item_price: *item_price,
                    expiration_time: *expiration_time,
                },
                coin_type.as_ref(),
            ),
            Self::CancelTokenOffer { offer, coin_type } => {
                payloads.cancel_token_offer(offer, coin_type.as_ref())
            }
            Self::FillTokenOfferV1 {
                offer,
                token_name,
                property_version,
                coin_type,
            } => payloads.fill_token_offer_for_tokenv1(
                offer,
                token_name,
                *property_version,
                coin_type.as_ref(),
            ),
            Self::FillTokenOfferV2 { offer, coin_type } => {
                payloads.fill_token_offer_for_tokenv2(offer, coin_type.as_ref())
            }
            Self::CollectionOfferV1 {
                creator,
                collection_name,
                fee_schedule,
                item_price,
                amount,
                expiration_time,
                coin_type,
            } => payloads.init_collection_offer_for_tokenv1(
                creator,
                collection_name,
                fee_schedule,
                *amount,
                OfferTerms {
                    item_price: *item_price,
                    expiration_time: *expiration_time,
                },
                coin_type.as_ref(),
            ),
            Self::CollectionOfferV2 {
                collection,
                fee_schedule,
                item_price,
                amount,
                expiration_time,
                coin_type,
            } => payloads.init_collection_offer_for_tokenv2(
                collection,
                fee_schedule,
                *amount,
                OfferTerms {
                    item_price: *item_price,
                    expiration_time: *expiration_time,
                },
                coin_type.as_ref(),
            ),
            Self::CancelCollectionOffer { offer, coin_type } => {
                payloads.cancel_collection_offer(offer, coin_type.as_ref())
            }
            Self::FillCollectionOfferV1 {
                offer,
                token_name,
                property_version,
                coin_type,
            } => payloads.fill_collection_offer_for_tokenv1(
                offer,
                token_name,
                *property_version,
                coin_type.as_ref(),
            ),
            Self::FillCollectionOfferV2 {
                offer,
                token,
                coin_type,
            } => payloads.fill_collection_offer_for_tokenv2(offer, token, coin_type.as_ref()),
            Self::InitFeeSchedule(terms) => payloads.init_fee_schedule(terms),
            Self::SetFeeAddress {
                fee_schedule,
                fee_address,
            } => payloads.set_fee_address(fee_schedule, fee_address),
            Self::SetListingFee { fee_schedule, fee } => {
                payloads.set_fixed_rate_listing_fee(fee_schedule, *fee)
            }
            Self::SetBiddingFee { fee_schedule, fee } => {
                payloads.set_fixed_rate_bidding_fee(fee_schedule, *fee)
            }
            Self::SetFixedCommission {
                fee_schedule,
                commission,
            } => payloads.set_fixed_rate_commission(fee_schedule, *commission),
            Self::SetPercentageCommission {
                fee_schedule,
                denominator,
                numerator,
            } => payloads.set_percentage_rate_commission(fee_schedule, *denominator, *numerator),
            Self::CreateCollectionV1(collection) => token::create_collection_v1(collection),
            Self::MintV1(token) => token::mint_token_v1(token),
            Self::OfferTokenV1 {
                receiver,
                token,
                amount,
            } => token::offer_token_v1(receiver, token, *amount),
            Self::CreateCollectionV2(collection) => token::create_collection_v2(collection),
            Self::MintV2(token) => token::mint_token_v2(token),
            Self::TransferObject { object, to } => token::transfer_object(object, to),
        };
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payloads() -> MarketplacePayloads {
        MarketplacePayloads::from_address_str("0xCC").unwrap()
    }

    #[test]
    fn test_fixed_v2_form_matches_direct_call() {
        let form = ListingForm {
            kind: ListingKind::FixedV2 {
                object: " 0xAA ".to_string(),
                price: 100_000_000,
            },
            fee_schedule: "0xBB".to_string(),
            start_time: 1000,
            coin_type: None,
        };
        let built = form.build(&payloads()).unwrap();
        let direct = payloads().init_fixed_price(
            &Address::parse("0xAA").unwrap(),
            &Address::parse("0xBB").unwrap(),
            1000,
            100_000_000,
            None,
        );
        assert_eq!(built, direct);
    }

    #[test]
    fn test_auction_form_uses_form_start_time() {
        let form = ListingForm {
            kind: ListingKind::AuctionV1 {
                creator: "0x5".to_string(),
                collection: "Punks".to_string(),
                name: "Punk #1".to_string(),
                property_version: 0,
                auction: AuctionInput {
                    starting_bid: 10,
                    bid_increment: 1,
                    auction_end_time: 2000,
                    minimum_bid_time_before_end: 60,
                    buy_it_now_price: Some(99),
                },
            },
            fee_schedule: "0xBB".to_string(),
            start_time: 1500,
            coin_type: Some("0xabc::asset::USDC".to_string()),
        };
        let d = form.build(&payloads()).unwrap();
        assert_eq!(
            d.function().short_name(),
            "coin_listing::init_auction_for_tokenv1"
        );
        assert_eq!(d.type_arguments(), &["0xabc::asset::USDC".to_string()]);
        let args = d.arguments_json();
        assert_eq!(args.len(), 11);
        assert_eq!(args[5], json!("1500"));
        assert_eq!(args[10], json!({ "vec": ["99"] }));
    }

    #[test]
    fn test_form_rejects_bad_addresses() {
        let form = ListingForm {
            kind: ListingKind::FixedV2 {
                object: "0xAA".to_string(),
                price: 1,
            },
            fee_schedule: "fee-schedule".to_string(),
            start_time: 0,
            coin_type: None,
        };
        assert!(matches!(
            form.build(&payloads()),
            Err(PayloadError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_blank_coin_type_falls_back_to_default() {
        let form = ListingForm {
            kind: ListingKind::FixedV2 {
                object: "0xAA".to_string(),
                price: 1,
            },
            fee_schedule: "0xBB".to_string(),
            start_time: 0,
            coin_type: Some("  ".to_string()),
        };
        let d = form.build(&payloads()).unwrap();
        assert_eq!(d.type_arguments(), &["0x1::aptos_coin::AptosCoin".to_string()]);
    }

    #[test]
    fn test_request_from_json() {
        let request: PayloadRequest = serde_json::from_value(json!({
            "op": "listing",
            "kind": "fixed_v2",
            "object": "0xAA",
            "price": 5,
            "fee_schedule": "0xBB",
        }))
        .unwrap();
        let d = request.build(&payloads()).unwrap();
        assert_eq!(d.function().short_name(), "coin_listing::init_fixed_price");

        let request: PayloadRequest = serde_json::from_value(json!({
            "op": "transfer_object",
            "object": "0xAA",
            "to": "0xBB",
        }))
        .unwrap();
        let d = request.build(&payloads()).unwrap();
        assert_eq!(d.function().to_string(), "0x1::object::transfer");
    }

    #[test]
    fn test_request_rejects_bad_address_at_parse_time() {
        let parsed = serde_json::from_value::<PayloadRequest>(json!({
            "op": "purchase",
            "listing": "not-an-address",
        }));
        assert!(parsed.is_err());
    }
}
