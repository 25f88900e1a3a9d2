//! Reference table of supported entry functions
//!
//! Nothing here is consulted when building a payload; the chain is the
//! authority on parameter lists. The table documents what each builder is
//! expected to produce and is printed by `nft-market signatures`.

use super::descriptor::TransactionDescriptor;
use serde::Serialize;

/// Who publishes the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleHost {
    /// The marketplace contract address
    Marketplace,
    /// A framework address (`0x1`, `0x3`, `0x4`)
    Framework(u8),
}

/// One entry function: parameters exclude the leading `&signer`
#[derive(Debug, Clone, Serialize)]
pub struct EntrySignature {
    pub host: ModuleHost,
    pub module: &'static str,
    pub function: &'static str,
    pub type_params: usize,
    pub params: &'static [&'static str],
}

impl EntrySignature {
    /// `module::function`
    pub fn short_name(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }

    /// Check a descriptor's shape against this signature
    pub fn matches(&self, descriptor: &TransactionDescriptor) -> bool {
        let function = descriptor.function();
        let host_ok = match self.host {
            ModuleHost::Marketplace => true,
            ModuleHost::Framework(n) => function.address.as_bytes()[31] == n
                && function.address.is_special(),
        };
        host_ok
            && function.module == self.module
            && function.name == self.function
            && descriptor.type_arguments().len() == self.type_params
            && descriptor.arguments().len() == self.params.len()
    }
}

const fn market(
    module: &'static str,
    function: &'static str,
    type_params: usize,
    params: &'static [&'static str],
) -> EntrySignature {
    EntrySignature {
        host: ModuleHost::Marketplace,
        module,
        function,
        type_params,
        params,
    }
}

const fn framework(
    address: u8,
    module: &'static str,
    function: &'static str,
    type_params: usize,
    params: &'static [&'static str],
) -> EntrySignature {
    EntrySignature {
        host: ModuleHost::Framework(address),
        module,
        function,
        type_params,
        params,
    }
}

/// Every entry function a builder in this crate targets
pub static SIGNATURES: &[EntrySignature] = &[
    market(
        "coin_listing",
        "init_fixed_price",
        1,
        &["object", "fee_schedule", "start_time", "price"],
    ),
    market(
        "coin_listing",
        "init_fixed_price_for_tokenv1",
        1,
        &[
            "token_creator",
            "token_collection",
            "token_name",
            "token_property_version",
            "fee_schedule",
            "start_time",
            "price",
        ],
    ),
    market(
        "coin_listing",
        "init_auction",
        1,
        &[
            "object",
            "fee_schedule",
            "start_time",
            "starting_bid",
            "bid_increment",
            "auction_end_time",
            "minimum_bid_time_before_end",
            "buy_it_now_price",
        ],
    ),
    market(
        "coin_listing",
        "init_auction_for_tokenv1",
        1,
        &[
            "token_creator",
            "token_collection",
            "token_name",
            "token_property_version",
            "fee_schedule",
            "start_time",
            "starting_bid",
            "bid_increment",
            "auction_end_time",
            "minimum_bid_time_before_end",
            "buy_it_now_price",
        ],
    ),
    market("coin_listing", "purchase", 1, &["object"]),
    market("coin_listing", "end_fixed_price", 1, &["object"]),
    market("coin_listing", "bid", 1, &["object", "bid_amount"]),
    market("coin_listing", "complete_auction", 1, &["object"]),
    market(
        "token_offer",
        "init_for_tokenv1_entry",
        1,
        &[
            "token_creator",
            "token_collection",
            "token_name",
            "property_version",
            "fee_schedule",
            "item_price",
            "expiration_time",
        ],
    ),
    market(
        "token_offer",
        "init_for_tokenv2_entry",
        1,
        &["token", "fee_schedule", "item_price", "expiration_time"],
    ),
    market("token_offer", "cancel", 1, &["token_offer"]),
    market(
        "token_offer",
        "sell_tokenv1_entry",
        1,
        &["token_offer", "token_name", "property_version"],
    ),
    market("token_offer", "sell_tokenv2", 1, &["token_offer"]),
    market(
        "collection_offer",
        "init_for_tokenv1_entry",
        1,
        &[
            "creator_address",
            "collection_name",
            "fee_schedule",
            "item_price",
            "amount",
            "expiration_time",
        ],
    ),
    market(
        "collection_offer",
        "init_for_tokenv2_entry",
        1,
        &[
            "collection",
            "fee_schedule",
            "item_price",
            "amount",
            "expiration_time",
        ],
    ),
    market("collection_offer", "cancel", 1, &["collection_offer"]),
    market(
        "collection_offer",
        "sell_tokenv1_entry",
        1,
        &["collection_offer", "token_name", "property_version"],
    ),
    market(
        "collection_offer",
        "sell_tokenv2",
        1,
        &["collection_offer", "token"],
    ),
    market(
        "fee_schedule",
        "init_entry",
        0,
        &[
            "fee_address",
            "commission_denominator",
            "commission_numerator",
            "bidding_fee",
            "listing_fee",
        ],
    ),
    market(
        "fee_schedule",
        "set_fee_address",
        0,
        &["fee_schedule", "fee_address"],
    ),
    market(
        "fee_schedule",
        "set_fixed_rate_listing_fee",
        0,
        &["fee_schedule", "fee"],
    ),
    market(
        "fee_schedule",
        "set_fixed_rate_bidding_fee",
        0,
        &["fee_schedule", "fee"],
    ),
    market(
        "fee_schedule",
        "set_fixed_rate_commission",
        0,
        &["fee_schedule", "commission"],
    ),
    market(
        "fee_schedule",
        "set_percentage_rate_commission",
        0,
        &["fee_schedule", "denominator", "numerator"],
    ),
    framework(
        3,
        "token",
        "create_collection_script",
        0,
        &["name", "description", "uri", "maximum", "mutate_setting"],
    ),
    framework(
        3,
        "token",
        "create_token_script",
        0,
        &[
            "collection",
            "name",
            "description",
            "balance",
            "maximum",
            "uri",
            "royalty_payee_address",
            "royalty_points_denominator",
            "royalty_points_numerator",
            "mutate_setting",
            "property_keys",
            "property_values",
            "property_types",
        ],
    ),
    framework(
        3,
        "token_transfers",
        "offer_script",
        0,
        &[
            "receiver",
            "creator",
            "collection",
            "name",
            "property_version",
            "amount",
        ],
    ),
    framework(
        4,
        "aptos_token",
        "create_collection",
        0,
        &[
            "description",
            "max_supply",
            "name",
            "uri",
            "mutable_description",
            "mutable_royalty",
            "mutable_uri",
            "mutable_token_description",
            "mutable_token_name",
            "mutable_token_properties",
            "mutable_token_uri",
            "tokens_burnable_by_creator",
            "tokens_freezable_by_creator",
            "royalty_numerator",
            "royalty_denominator",
        ],
    ),
    framework(
        4,
        "aptos_token",
        "mint",
        0,
        &[
            "collection",
            "description",
            "name",
            "uri",
            "property_keys",
            "property_types",
            "property_values",
        ],
    ),
    framework(1, "object", "transfer", 1, &["object", "to"]),
];

/// Find a signature by `module::function`
pub fn lookup(short_name: &str) -> Option<&'static EntrySignature> {
    SIGNATURES.iter().find(|sig| sig.short_name() == short_name)
}

/// Find the signature a descriptor targets, ignoring argument shape
pub fn signature_for(descriptor: &TransactionDescriptor) -> Option<&'static EntrySignature> {
    lookup(&descriptor.function().short_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_short_names_are_unique() {
        let names: HashSet<String> = SIGNATURES.iter().map(|s| s.short_name()).collect();
        assert_eq!(names.len(), SIGNATURES.len());
    }

    #[test]
    fn test_lookup() {
        let sig = lookup("coin_listing::bid").unwrap();
        assert_eq!(sig.params, &["object", "bid_amount"]);
        assert_eq!(sig.type_params, 1);
        assert!(lookup("coin_listing::nope").is_none());
        assert_eq!(
            lookup("object::transfer").unwrap().host,
            ModuleHost::Framework(1)
        );
    }
}
