//! Framework token-standard payloads
//!
//! Collection creation, minting and transfers target the framework modules
//! (`0x3` for the V1 standard, `0x4` for V2, `0x1::object` for transfers)
//! rather than the marketplace contract, so these are free functions.

use super::address::Address;
use super::descriptor::{EntryFunctionId, MoveValue, TransactionDescriptor, OBJECT_CORE};
use serde::{Deserialize, Serialize};

fn framework(address: u8, module: &str, name: &str) -> EntryFunctionId {
    EntryFunctionId {
        address: Address::special(address),
        module: module.to_string(),
        name: name.to_string(),
    }
}

/// V1 collection parameters (`0x3::token::create_collection_script`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionV1 {
    pub name: String,
    pub description: String,
    pub uri: String,
    /// Zero means unlimited
    pub maximum: u64,
    /// description, uri, maximum
    #[serde(default)]
    pub mutate_setting: [bool; 3],
}

pub fn create_collection_v1(collection: &CollectionV1) -> TransactionDescriptor {
    TransactionDescriptor::new(
        framework(3, "token", "create_collection_script"),
        Vec::new(),
        vec![
            MoveValue::from(collection.name.as_str()),
            MoveValue::from(collection.description.as_str()),
            MoveValue::from(collection.uri.as_str()),
            MoveValue::U64(collection.maximum),
            MoveValue::bools(&collection.mutate_setting),
        ],
    )
}

/// A typed on-chain property: key, Move type name, BCS-encoded value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProperty {
    pub key: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: Vec<u8>,
}

impl TokenProperty {
    /// A `0x1::string::String` property, BCS-encoded (ULEB128 length prefix)
    pub fn string(key: impl Into<String>, value: &str) -> Self {
        let mut encoded = Vec::with_capacity(value.len() + 2);
        let mut len = value.len();
        loop {
            let byte = (len & 0x7f) as u8;
            len >>= 7;
            if len == 0 {
                encoded.push(byte);
                break;
            }
            encoded.push(byte | 0x80);
        }
        encoded.extend_from_slice(value.as_bytes());
        Self {
            key: key.into(),
            type_name: "0x1::string::String".to_string(),
            value: encoded,
        }
    }

    pub fn u64(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            type_name: "u64".to_string(),
            value: value.to_le_bytes().to_vec(),
        }
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self {
            key: key.into(),
            type_name: "bool".to_string(),
            value: vec![u8::from(value)],
        }
    }
}

fn split_properties(properties: &[TokenProperty]) -> (MoveValue, MoveValue, MoveValue) {
    let keys = MoveValue::strings(properties.iter().map(|p| p.key.as_str()));
    let types = MoveValue::strings(properties.iter().map(|p| p.type_name.as_str()));
    let values = MoveValue::Vector(
        properties
            .iter()
            .map(|p| MoveValue::Bytes(p.value.clone()))
            .collect(),
    );
    (keys, types, values)
}

/// V1 token parameters (`0x3::token::create_token_script`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenV1 {
    pub collection: String,
    pub name: String,
    pub description: String,
    pub balance: u64,
    pub maximum: u64,
    pub uri: String,
    pub royalty_payee_address: Address,
    pub royalty_points_denominator: u64,
    pub royalty_points_numerator: u64,
    /// maximum, uri, royalty, description, properties
    #[serde(default)]
    pub mutate_setting: [bool; 5],
    #[serde(default)]
    pub properties: Vec<TokenProperty>,
}

pub fn mint_token_v1(token: &TokenV1) -> TransactionDescriptor {
    let (keys, types, values) = split_properties(&token.properties);
    TransactionDescriptor::new(
        framework(3, "token", "create_token_script"),
        Vec::new(),
        vec![
            MoveValue::from(token.collection.as_str()),
            MoveValue::from(token.name.as_str()),
            MoveValue::from(token.description.as_str()),
            MoveValue::U64(token.balance),
            MoveValue::U64(token.maximum),
            MoveValue::from(token.uri.as_str()),
            MoveValue::from(&token.royalty_payee_address),
            MoveValue::U64(token.royalty_points_denominator),
            MoveValue::U64(token.royalty_points_numerator),
            MoveValue::bools(&token.mutate_setting),
            keys,
            values,
            types,
        ],
    )
}

/// Offer a V1 token to a receiver (`0x3::token_transfers::offer_script`)
///
/// V1 transfers are two-phase: the receiver has to claim the offer.
pub fn offer_token_v1(
    receiver: &Address,
    token: &super::marketplace::TokenV1Id,
    amount: u64,
) -> TransactionDescriptor {
    let mut arguments: Vec<MoveValue> = vec![MoveValue::from(receiver)];
    arguments.extend(token.arguments());
    arguments.push(MoveValue::U64(amount));
    TransactionDescriptor::new(
        framework(3, "token_transfers", "offer_script"),
        Vec::new(),
        arguments,
    )
}

/// Mutability flags for a V2 collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionV2Mutability {
    pub description: bool,
    pub royalty: bool,
    pub uri: bool,
    pub token_description: bool,
    pub token_name: bool,
    pub token_properties: bool,
    pub token_uri: bool,
    pub tokens_burnable_by_creator: bool,
    pub tokens_freezable_by_creator: bool,
}

/// V2 collection parameters (`0x4::aptos_token::create_collection`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionV2 {
    pub description: String,
    pub max_supply: u64,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub mutability: CollectionV2Mutability,
    pub royalty_numerator: u64,
    pub royalty_denominator: u64,
}

pub fn create_collection_v2(collection: &CollectionV2) -> TransactionDescriptor {
    let m = &collection.mutability;
    TransactionDescriptor::new(
        framework(4, "aptos_token", "create_collection"),
        Vec::new(),
        vec![
            MoveValue::from(collection.description.as_str()),
            MoveValue::U64(collection.max_supply),
            MoveValue::from(collection.name.as_str()),
            MoveValue::from(collection.uri.as_str()),
            MoveValue::Bool(m.description),
            MoveValue::Bool(m.royalty),
            MoveValue::Bool(m.uri),
            MoveValue::Bool(m.token_description),
            MoveValue::Bool(m.token_name),
            MoveValue::Bool(m.token_properties),
            MoveValue::Bool(m.token_uri),
            MoveValue::Bool(m.tokens_burnable_by_creator),
            MoveValue::Bool(m.tokens_freezable_by_creator),
            MoveValue::U64(collection.royalty_numerator),
            MoveValue::U64(collection.royalty_denominator),
        ],
    )
}

/// V2 token parameters (`0x4::aptos_token::mint`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenV2 {
    pub collection: String,
    pub description: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub properties: Vec<TokenProperty>,
}

pub fn mint_token_v2(token: &TokenV2) -> TransactionDescriptor {
    let (keys, types, values) = split_properties(&token.properties);
    TransactionDescriptor::new(
        framework(4, "aptos_token", "mint"),
        Vec::new(),
        vec![
            MoveValue::from(token.collection.as_str()),
            MoveValue::from(token.description.as_str()),
            MoveValue::from(token.name.as_str()),
            MoveValue::from(token.uri.as_str()),
            keys,
            types,
            values,
        ],
    )
}

/// Transfer any object, V2 tokens included (`0x1::object::transfer`)
pub fn transfer_object(object: &Address, to: &Address) -> TransactionDescriptor {
    TransactionDescriptor::new(
        framework(1, "object", "transfer"),
        vec![OBJECT_CORE.to_string()],
        vec![MoveValue::from(object), MoveValue::from(to)],
    )
}
