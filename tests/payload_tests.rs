//! Payload builder: every supported operation against the signature table

use nft_market_client::payload::{
    normalize_address, signatures, Address, CoinType, MarketplacePayloads, PayloadRequest,
    SIGNATURES,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;

fn payloads() -> MarketplacePayloads {
    MarketplacePayloads::from_address_str("0xCC").unwrap()
}

/// One request per entry function the marketplace supports
fn every_request() -> Vec<Value> {
    let v1_token = json!({
        "creator": "0xA1",
        "collection": "Monkeys",
        "name": "Monkey #1",
        "property_version": 0
    });
    let auction = json!({
        "starting_bid": 100,
        "bid_increment": 10,
        "auction_end_time": 2000,
        "minimum_bid_time_before_end": 60
    });
    vec![
        json!({ "op": "listing", "kind": "fixed_v1", "creator": "0xA1", "collection": "Monkeys",
                "name": "Monkey #1", "price": 5, "fee_schedule": "0xBB", "start_time": 1000 }),
        json!({ "op": "listing", "kind": "auction_v1", "creator": "0xA1", "collection": "Monkeys",
                "name": "Monkey #1", "auction": auction, "fee_schedule": "0xBB" }),
        json!({ "op": "listing", "kind": "fixed_v2", "object": "0xAA", "price": 5,
                "fee_schedule": "0xBB" }),
        json!({ "op": "listing", "kind": "auction_v2", "object": "0xAA", "auction": auction,
                "fee_schedule": "0xBB" }),
        json!({ "op": "purchase", "listing": "0x10" }),
        json!({ "op": "end_fixed_price", "listing": "0x10" }),
        json!({ "op": "bid", "listing": "0x10", "amount": 150 }),
        json!({ "op": "complete_auction", "listing": "0x10" }),
        json!({ "op": "token_offer_v1", "token": v1_token, "fee_schedule": "0xBB",
                "item_price": 7, "expiration_time": 3000 }),
        json!({ "op": "token_offer_v2", "token": "0xAA", "fee_schedule": "0xBB",
                "item_price": 7, "expiration_time": 3000 }),
        json!({ "op": "cancel_token_offer", "offer": "0x20" }),
        json!({ "op": "fill_token_offer_v1", "offer": "0x20", "token_name": "Monkey #1" }),
        json!({ "op": "fill_token_offer_v2", "offer": "0x20" }),
        json!({ "op": "collection_offer_v1", "creator": "0xA1", "collection_name": "Monkeys",
                "fee_schedule": "0xBB", "item_price": 7, "amount": 3, "expiration_time": 3000 }),
        json!({ "op": "collection_offer_v2", "collection": "0xC1", "fee_schedule": "0xBB",
                "item_price": 7, "amount": 3, "expiration_time": 3000 }),
        json!({ "op": "cancel_collection_offer", "offer": "0x30" }),
        json!({ "op": "fill_collection_offer_v1", "offer": "0x30", "token_name": "Monkey #2" }),
        json!({ "op": "fill_collection_offer_v2", "offer": "0x30", "token": "0xAA" }),
        json!({ "op": "init_fee_schedule", "fee_address": "0xFE", "commission_denominator": 100,
                "commission_numerator": 2, "bidding_fee": 1, "listing_fee": 1 }),
        json!({ "op": "set_fee_address", "fee_schedule": "0xBB", "fee_address": "0xFE" }),
        json!({ "op": "set_listing_fee", "fee_schedule": "0xBB", "fee": 3 }),
        json!({ "op": "set_bidding_fee", "fee_schedule": "0xBB", "fee": 3 }),
        json!({ "op": "set_fixed_commission", "fee_schedule": "0xBB", "commission": 9 }),
        json!({ "op": "set_percentage_commission", "fee_schedule": "0xBB",
                "denominator": 100, "numerator": 5 }),
        json!({ "op": "create_collection_v1", "name": "Monkeys", "description": "d",
                "uri": "https://x/c", "maximum": 0 }),
        json!({ "op": "mint_v1", "collection": "Monkeys", "name": "Monkey #1", "description": "d",
                "balance": 1, "maximum": 1, "uri": "https://x/1", "royalty_payee_address": "0xA1",
                "royalty_points_denominator": 100, "royalty_points_numerator": 5 }),
        json!({ "op": "offer_token_v1", "receiver": "0xB2", "token": v1_token }),
        json!({ "op": "create_collection_v2", "description": "d", "max_supply": 100,
                "name": "Apes", "uri": "https://x/c", "royalty_numerator": 5,
                "royalty_denominator": 100 }),
        json!({ "op": "mint_v2", "collection": "Apes", "description": "d", "name": "Ape #1",
                "uri": "https://x/1" }),
        json!({ "op": "transfer_object", "object": "0xAA", "to": "0xB2" }),
    ]
}

#[test]
fn test_every_operation_matches_its_signature() {
    let payloads = payloads();
    let mut covered = HashSet::new();

    for raw in every_request() {
        let request: PayloadRequest = serde_json::from_value(raw.clone())
            .unwrap_or_else(|e| panic!("{} did not parse: {}", raw, e));
        let descriptor = request.build(&payloads).unwrap();
        let signature = signatures::signature_for(&descriptor)
            .unwrap_or_else(|| panic!("no signature for {}", descriptor.function()));
        assert!(
            signature.matches(&descriptor),
            "{} does not match {:?}",
            descriptor.function(),
            signature
        );
        covered.insert(signature.short_name());
    }

    assert_eq!(covered.len(), SIGNATURES.len());
}

#[test]
fn test_fixed_price_v2_listing_payload() {
    let descriptor = payloads().init_fixed_price(
        &Address::parse("0xAA").unwrap(),
        &Address::parse("0xBB").unwrap(),
        1000,
        100_000_000,
        None,
    );

    assert_eq!(
        descriptor.to_payload_json(),
        json!({
            "type": "entry_function_payload",
            "function": "0xCC::coin_listing::init_fixed_price",
            "type_arguments": ["0x1::aptos_coin::AptosCoin"],
            "arguments": ["0xAA", "0xBB", "1000", "100000000"]
        })
    );
}

#[test]
fn test_marketplace_calls_use_contract_and_coin() {
    let usdc = CoinType::parse("0xf22b::asset::USDC").unwrap();
    let payloads = payloads().with_default_coin(usdc.clone());
    let listing = Address::parse("0x10").unwrap();

    let bid = payloads.bid(&listing, 150, None);
    assert_eq!(bid.function().address, Address::parse("0xcc").unwrap());
    assert_eq!(bid.type_arguments(), [usdc.as_str().to_string()]);

    let explicit = CoinType::aptos_coin();
    let purchase = payloads.purchase(&listing, Some(&explicit));
    assert_eq!(purchase.type_arguments(), [explicit.as_str().to_string()]);
}

#[test]
fn test_fee_schedule_calls_take_no_type_arguments() {
    let fs = Address::parse("0xBB").unwrap();
    let descriptor = payloads().set_percentage_rate_commission(&fs, 100, 5);
    assert!(descriptor.type_arguments().is_empty());
    assert_eq!(
        descriptor.arguments_json(),
        vec![json!("0xBB"), json!("100"), json!("5")]
    );
}

#[test]
fn test_auction_buy_it_now_is_an_option() {
    let request: PayloadRequest = serde_json::from_value(json!({
        "op": "listing",
        "kind": "auction_v2",
        "object": "0xAA",
        "fee_schedule": "0xBB",
        "start_time": 1000,
        "auction": {
            "starting_bid": 100,
            "bid_increment": 10,
            "auction_end_time": 2000,
            "minimum_bid_time_before_end": 60,
            "buy_it_now_price": 500
        }
    }))
    .unwrap();

    let args = request.build(&payloads()).unwrap().arguments_json();

    assert_eq!(args[2], json!("1000"));
    assert_eq!(args[7], json!({ "vec": ["500"] }));
}

#[test]
fn test_invalid_request_field_is_rejected() {
    let result: Result<PayloadRequest, _> = serde_json::from_value(json!({
        "op": "purchase",
        "listing": "0xZZ"
    }));
    assert!(result.is_err());

    let form: PayloadRequest = serde_json::from_value(json!({
        "op": "listing",
        "kind": "fixed_v2",
        "object": "not hex",
        "price": 1,
        "fee_schedule": "0xBB"
    }))
    .unwrap();
    assert!(form.build(&payloads()).is_err());
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(digits in "[0-9a-fA-F]{1,64}", prefix in "(0x|0X)?") {
        let once = normalize_address(&format!(" {}{} ", prefix, digits)).unwrap();
        let twice = normalize_address(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.starts_with("0x"));
    }

    #[test]
    fn prop_short_and_long_forms_are_equal(digits in "[0-9a-f]{1,64}") {
        let short = Address::parse(&digits).unwrap();
        let long = Address::parse(&short.to_long_string()).unwrap();
        prop_assert_eq!(short, long);
    }
}
