//! `token_offer` and `collection_offer` payloads

use super::address::Address;
use super::descriptor::{CoinType, MoveValue, TransactionDescriptor};
use super::marketplace::{MarketplacePayloads, TokenV1Id};

const TOKEN_OFFER: &str = "token_offer";
const COLLECTION_OFFER: &str = "collection_offer";

/// Price and lifetime of an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferTerms {
    pub item_price: u64,
    pub expiration_time: u64,
}

impl MarketplacePayloads {
    /// Offer to buy one V1 token
    pub fn init_token_offer_for_tokenv1(
        &self,
        token: &TokenV1Id,
        fee_schedule: &Address,
        terms: OfferTerms,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        let mut arguments = token.arguments().to_vec();
        arguments.extend([
            MoveValue::from(fee_schedule),
            MoveValue::U64(terms.item_price),
            MoveValue::U64(terms.expiration_time),
        ]);
        self.coin_call(TOKEN_OFFER, "init_for_tokenv1_entry", coin, arguments)
    }

    /// Offer to buy one V2 token
    pub fn init_token_offer_for_tokenv2(
        &self,
        token: &Address,
        fee_schedule: &Address,
        terms: OfferTerms,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            TOKEN_OFFER,
            "init_for_tokenv2_entry",
            coin,
            vec![
                token.into(),
                fee_schedule.into(),
                terms.item_price.into(),
                terms.expiration_time.into(),
            ],
        )
    }

    pub fn cancel_token_offer(
        &self,
        token_offer: &Address,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(TOKEN_OFFER, "cancel", coin, vec![token_offer.into()])
    }

    /// Accept a V1 token offer as the token's owner
    pub fn fill_token_offer_for_tokenv1(
        &self,
        token_offer: &Address,
        token_name: &str,
        property_version: u64,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            TOKEN_OFFER,
            "sell_tokenv1_entry",
            coin,
            vec![
                token_offer.into(),
                token_name.into(),
                property_version.into(),
            ],
        )
    }

    /// Accept a V2 token offer as the token's owner
    pub fn fill_token_offer_for_tokenv2(
        &self,
        token_offer: &Address,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(TOKEN_OFFER, "sell_tokenv2", coin, vec![token_offer.into()])
    }

    /// Offer to buy up to `amount` tokens from a V1 collection
    pub fn init_collection_offer_for_tokenv1(
        &self,
        creator: &Address,
        collection_name: &str,
        fee_schedule: &Address,
        amount: u64,
        terms: OfferTerms,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            COLLECTION_OFFER,
            "init_for_tokenv1_entry",
            coin,
            vec![
                creator.into(),
                collection_name.into(),
                fee_schedule.into(),
                terms.item_price.into(),
                amount.into(),
                terms.expiration_time.into(),
            ],
        )
    }

    /// Offer to buy up to `amount` tokens from a V2 collection
    pub fn init_collection_offer_for_tokenv2(
        &self,
        collection: &Address,
        fee_schedule: &Address,
        amount: u64,
        terms: OfferTerms,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            COLLECTION_OFFER,
            "init_for_tokenv2_entry",
            coin,
            vec![
                collection.into(),
                fee_schedule.into(),
                terms.item_price.into(),
                amount.into(),
                terms.expiration_time.into(),
            ],
        )
    }

    pub fn cancel_collection_offer(
        &self,
        collection_offer: &Address,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            COLLECTION_OFFER,
            "cancel",
            coin,
            vec![collection_offer.into()],
        )
    }

    /// Sell one V1 token into a collection offer
    pub fn fill_collection_offer_for_tokenv1(
        &self,
        collection_offer: &Address,
        token_name: &str,
        property_version: u64,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            COLLECTION_OFFER,
            "sell_tokenv1_entry",
            coin,
            vec![
                collection_offer.into(),
                token_name.into(),
                property_version.into(),
            ],
        )
    }

    /// Sell one V2 token into a collection offer
    pub fn fill_collection_offer_for_tokenv2(
        &self,
        collection_offer: &Address,
        token: &Address,
        coin: Option<&CoinType>,
    ) -> TransactionDescriptor {
        self.coin_call(
            COLLECTION_OFFER,
            "sell_tokenv2",
            coin,
            vec![collection_offer.into(), token.into()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    #[test]
    fn test_collection_offer_v1_puts_price_before_amount() {
        let payloads = MarketplacePayloads::new(addr("0xCC"));
        let d = payloads.init_collection_offer_for_tokenv1(
            &addr("0x7"),
            "Punks",
            &addr("0xDD"),
            3,
            OfferTerms {
                item_price: 500,
                expiration_time: 9_999,
            },
            None,
        );
        assert_eq!(
            d.function().short_name(),
            "collection_offer::init_for_tokenv1_entry"
        );
        assert_eq!(
            d.arguments_json(),
            vec![
                json!("0x7"),
                json!("Punks"),
                json!("0xDD"),
                json!("500"),
                json!("3"),
                json!("9999")
            ]
        );
    }

    #[test]
    fn test_token_offer_v1_and_v2_differ_in_shape() {
        let payloads = MarketplacePayloads::new(addr("0xCC"));
        let terms = OfferTerms {
            item_price: 10,
            expiration_time: 20,
        };
        let v1 = payloads.init_token_offer_for_tokenv1(
            &TokenV1Id::new(addr("0x7"), "Punks", "Punk #3", 1),
            &addr("0xDD"),
            terms,
            None,
        );
        let v2 = payloads.init_token_offer_for_tokenv2(&addr("0xEE"), &addr("0xDD"), terms, None);
        assert_eq!(v1.arguments().len(), 7);
        assert_eq!(v2.arguments().len(), 4);
        assert_ne!(v1.function(), v2.function());
    }
}
