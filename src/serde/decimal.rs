//! Serde functions for encoding arbitrary-width unsigned integers as decimal strings.
//!
//! Values travel as strings such as `"400"`.

use alloc::string::String;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serializer, de::Error};

/// Serializes an unsigned integer as a decimal string.
pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_str_radix(10))
}

/// Deserializes an unsigned integer from a decimal string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| D::Error::custom("invalid decimal integer"))
}
