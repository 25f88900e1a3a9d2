//! Address normalization
//!
//! Addresses are 32-byte values that show up in several spellings:
//! - Short form: "0x1"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000001"
//! - Without prefix: "1"
//!
//! The canonical form used in payloads is the input with surrounding
//! whitespace trimmed and a lowercase `0x` prefix ensured; the hex digits
//! are kept as given. That is the form wallets expect and it is idempotent.
//! Equality and hashing go through the decoded bytes, so "0xAA" and
//! "0x00aa" compare equal.

use super::errors::PayloadError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Number of bytes in an address
pub const ADDRESS_LENGTH: usize = 32;

/// Normalize an address string to canonical form.
///
/// # Examples
///
/// ```
/// use nft_market_client::payload::normalize_address;
///
/// assert_eq!(normalize_address("0xAA").unwrap(), "0xAA");
/// assert_eq!(normalize_address(" 0Xab ").unwrap(), "0xab");
/// assert_eq!(normalize_address("1").unwrap(), "0x1");
/// assert!(normalize_address("0xnope").is_err());
/// ```
pub fn normalize_address(input: &str) -> Result<String, PayloadError> {
    let digits = hex_digits(input)?;
    Ok(format!("0x{}", digits))
}

/// Validate and return the hex digits of an address, without prefix
fn hex_digits(input: &str) -> Result<&str, PayloadError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(PayloadError::invalid_address(input, "empty address"));
    }
    if digits.len() > ADDRESS_LENGTH * 2 {
        return Err(PayloadError::invalid_address(
            input,
            format!("{} hex digits exceeds {}", digits.len(), ADDRESS_LENGTH * 2),
        ));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(PayloadError::invalid_address(
            input,
            format!("non-hex character '{}'", bad),
        ));
    }
    Ok(digits)
}

/// A parsed, validated address
///
/// Keeps the canonical spelling for serialization alongside the decoded
/// bytes used for comparison.
#[derive(Clone)]
pub struct Address {
    canonical: String,
    bytes: [u8; ADDRESS_LENGTH],
}

impl Address {
    /// Parse an address from any accepted spelling
    pub fn parse(input: &str) -> Result<Self, PayloadError> {
        let digits = hex_digits(input)?;
        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| PayloadError::invalid_address(input, e.to_string()))?;
        Ok(Self {
            canonical: format!("0x{}", digits),
            bytes,
        })
    }

    /// The well-known framework address 0x1
    pub fn one() -> Self {
        Self::special(1)
    }

    /// Framework address `0x0` through `0xff`, in short form
    pub fn special(last: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = last;
        Self::from_bytes(bytes)
    }

    /// Build from raw bytes; the canonical spelling is the short form
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        let mut addr = Self {
            canonical: String::new(),
            bytes,
        };
        addr.canonical = addr.to_short_string();
        addr
    }

    /// Canonical spelling (as used in payloads)
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Decoded address bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    /// Full 64-digit lowercase form
    pub fn to_long_string(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Leading zeros stripped, lowercase; "0x0" for the zero address
    pub fn to_short_string(&self) -> String {
        let long = hex::encode(self.bytes);
        let trimmed = long.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }

    /// Special addresses are 0x0 through 0xf
    pub fn is_special(&self) -> bool {
        self.bytes[..ADDRESS_LENGTH - 1].iter().all(|b| *b == 0) && self.bytes[31] < 0x10
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.canonical)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Address {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Address {
    type Error = PayloadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Address {
    type Error = PayloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
