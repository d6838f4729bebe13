//! Parameter kinds and decoded values.
//!
//! Only fixed-width, single-slot ABI types are supported: every parameter
//! occupies exactly one 32-byte word, either as a topic or as a stride of the
//! data payload.

use alloy_primitives::{Address, U256};
use serde::{Serialize, Serializer};
use std::fmt;

/// A supported ABI parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// 20-byte address, right-aligned in its slot.
    Address,
    /// Unsigned integer. Width in bits (8..=256, multiple of 8).
    Uint(u16),
    Bool,
    /// Fixed-size byte array, left-aligned. Length in bytes (1..=32).
    FixedBytes(u8),
}

impl ParamKind {
    /// Parse a Solidity type name. Returns `None` for anything outside the
    /// supported subset (dynamic types, arrays, tuples, signed integers).
    pub fn parse(ty: &str) -> Option<Self> {
        match ty {
            "address" => Some(ParamKind::Address),
            "bool" => Some(ParamKind::Bool),
            "uint" => Some(ParamKind::Uint(256)),
            _ if ty.starts_with("uint") => {
                let bits: u16 = ty[4..].parse().ok()?;
                (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(ParamKind::Uint(bits))
            }
            _ if ty.starts_with("bytes") => {
                let len: u8 = ty[5..].parse().ok()?;
                (1..=32).contains(&len).then_some(ParamKind::FixedBytes(len))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Address => write!(f, "address"),
            ParamKind::Uint(bits) => write!(f, "uint{bits}"),
            ParamKind::Bool => write!(f, "bool"),
            ParamKind::FixedBytes(n) => write!(f, "bytes{n}"),
        }
    }
}

/// A decoded parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodedValue {
    Address(Address),
    Uint(U256),
    Bool(bool),
    FixedBytes(Vec<u8>),
}

impl DecodedValue {
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Address(a) => write!(f, "0x{}", hex::encode(a.as_slice())),
            DecodedValue::Uint(v) => write!(f, "{v}"),
            DecodedValue::Bool(b) => write!(f, "{b}"),
            DecodedValue::FixedBytes(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

/// Addresses and bytes serialize as lowercase `0x` hex, integers as decimal
/// strings (uint256 does not fit a JSON number).
impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_kinds() {
        assert_eq!(ParamKind::parse("address"), Some(ParamKind::Address));
        assert_eq!(ParamKind::parse("uint"), Some(ParamKind::Uint(256)));
        assert_eq!(ParamKind::parse("uint112"), Some(ParamKind::Uint(112)));
        assert_eq!(ParamKind::parse("bytes32"), Some(ParamKind::FixedBytes(32)));
        assert_eq!(ParamKind::parse("bytes4"), Some(ParamKind::FixedBytes(4)));
    }

    #[test]
    fn rejects_dynamic_and_odd_widths() {
        for ty in ["string", "bytes", "uint7", "uint264", "bytes33", "int256", "address[]"] {
            assert_eq!(ParamKind::parse(ty), None, "{ty}");
        }
    }

    #[test]
    fn canonical_display() {
        assert_eq!(ParamKind::Uint(256).to_string(), "uint256");
        assert_eq!(ParamKind::FixedBytes(32).to_string(), "bytes32");
    }

    #[test]
    fn value_json_shapes() {
        let addr = DecodedValue::Address(Address::repeat_byte(0xaa));
        assert_eq!(
            serde_json::to_value(&addr).unwrap(),
            serde_json::json!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")
        );
        let big = DecodedValue::Uint(U256::MAX);
        assert_eq!(
            serde_json::to_value(&big).unwrap(),
            serde_json::json!(U256::MAX.to_string())
        );
        assert_eq!(
            serde_json::to_value(DecodedValue::Bool(true)).unwrap(),
            serde_json::json!(true)
        );
    }
}
