//! Transaction descriptors
//!
//! A [`TransactionDescriptor`] is what the wallet signs and submits: the
//! fully-qualified entry function, its type arguments and its ordered
//! arguments in the JSON form the node's REST API accepts.

use super::address::Address;
use super::errors::PayloadError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));

/// Settlement currency used when the caller does not name one
pub const APTOS_COIN: &str = "0x1::aptos_coin::AptosCoin";

/// Type argument for `0x1::object::transfer`
pub const OBJECT_CORE: &str = "0x1::object::ObjectCore";

pub(crate) fn check_identifier(name: &str) -> Result<(), PayloadError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(PayloadError::InvalidIdentifier(name.to_string()))
    }
}

/// Fully-qualified entry/view function: `address::module::name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryFunctionId {
    pub address: Address,
    pub module: String,
    pub name: String,
}

impl EntryFunctionId {
    pub fn new(address: Address, module: &str, name: &str) -> Result<Self, PayloadError> {
        check_identifier(module)?;
        check_identifier(name)?;
        Ok(Self {
            address,
            module: module.to_string(),
            name: name.to_string(),
        })
    }

    /// `module::name`, without the address
    pub fn short_name(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}

impl FromStr for EntryFunctionId {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split("::").collect();
        if parts.len() != 3 {
            return Err(PayloadError::InvalidIdentifier(s.to_string()));
        }
        Self::new(Address::parse(parts[0])?, parts[1], parts[2])
    }
}

impl Serialize for EntryFunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A struct type tag such as a coin type: `0x1::aptos_coin::AptosCoin`
///
/// Generic parameters are accepted and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinType(String);

impl CoinType {
    pub fn parse(input: &str) -> Result<Self, PayloadError> {
        let trimmed = input.trim();
        let base = match trimmed.find('<') {
            Some(pos) => {
                if !trimmed.ends_with('>') {
                    return Err(PayloadError::invalid_type_tag(input, "unbalanced '<'"));
                }
                &trimmed[..pos]
            }
            None => trimmed,
        };
        let parts: Vec<&str> = base.split("::").collect();
        if parts.len() != 3 {
            return Err(PayloadError::invalid_type_tag(
                input,
                "expected address::module::Name",
            ));
        }
        let address = Address::parse(parts[0])
            .map_err(|e| PayloadError::invalid_type_tag(input, e.to_string()))?;
        for ident in &parts[1..] {
            check_identifier(ident)
                .map_err(|e| PayloadError::invalid_type_tag(input, e.to_string()))?;
        }
        let rest = &trimmed[base.len()..];
        Ok(Self(format!(
            "{}::{}::{}{}",
            address, parts[1], parts[2], rest
        )))
    }

    /// The default settlement currency
    pub fn aptos_coin() -> Self {
        Self(APTOS_COIN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve an optional caller-supplied coin type against a default
    pub fn or_default(coin: Option<&CoinType>, default: &CoinType) -> CoinType {
        coin.cloned().unwrap_or_else(|| default.clone())
    }
}

impl Default for CoinType {
    fn default() -> Self {
        Self::aptos_coin()
    }
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CoinType {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CoinType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A typed entry-function argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValue {
    Address(Address),
    U64(u64),
    Bool(bool),
    String(String),
    /// `vector<u8>`, encoded as 0x-prefixed hex
    Bytes(Vec<u8>),
    Vector(Vec<MoveValue>),
    Option(Option<Box<MoveValue>>),
}

impl MoveValue {
    /// JSON form accepted by the node for entry-function arguments
    pub fn to_json(&self) -> Value {
        match self {
            Self::Address(addr) => Value::String(addr.to_string()),
            Self::U64(n) => Value::String(n.to_string()),
            Self::Bool(b) => Value::Bool(*b),
            Self::String(s) => Value::String(s.clone()),
            Self::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
            Self::Vector(items) => Value::Array(items.iter().map(MoveValue::to_json).collect()),
            Self::Option(None) => json!({ "vec": [] }),
            Self::Option(Some(inner)) => json!({ "vec": [inner.to_json()] }),
        }
    }

    pub fn optional_u64(value: Option<u64>) -> Self {
        Self::Option(value.map(|v| Box::new(Self::U64(v))))
    }

    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Vector(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    pub fn bools(items: &[bool]) -> Self {
        Self::Vector(items.iter().copied().map(Self::Bool).collect())
    }
}

impl Serialize for MoveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<Address> for MoveValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<&Address> for MoveValue {
    fn from(value: &Address) -> Self {
        Self::Address(value.clone())
    }
}

impl From<u64> for MoveValue {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<bool> for MoveValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for MoveValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MoveValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Entry-function call ready to hand to a wallet
///
/// Built fresh per operation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDescriptor {
    function: EntryFunctionId,
    type_arguments: Vec<String>,
    arguments: Vec<MoveValue>,
}

impl TransactionDescriptor {
    pub fn new(
        function: EntryFunctionId,
        type_arguments: Vec<String>,
        arguments: Vec<MoveValue>,
    ) -> Self {
        Self {
            function,
            type_arguments,
            arguments,
        }
    }

    pub fn function(&self) -> &EntryFunctionId {
        &self.function
    }

    pub fn type_arguments(&self) -> &[String] {
        &self.type_arguments
    }

    pub fn arguments(&self) -> &[MoveValue] {
        &self.arguments
    }

    /// Arguments in their serialized JSON form
    pub fn arguments_json(&self) -> Vec<Value> {
        self.arguments.iter().map(MoveValue::to_json).collect()
    }

    /// The REST API `entry_function_payload` object
    pub fn to_payload_json(&self) -> Value {
        json!({
            "type": "entry_function_payload",
            "function": self.function.to_string(),
            "type_arguments": self.type_arguments,
            "arguments": self.arguments_json(),
        })
    }
}

impl Serialize for TransactionDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TransactionDescriptor", 4)?;
        state.serialize_field("type", "entry_function_payload")?;
        state.serialize_field("function", &self.function)?;
        state.serialize_field("type_arguments", &self.type_arguments)?;
        state.serialize_field("arguments", &self.arguments)?;
        state.end()
    }
}
