//! Converts alloy-core `DynSolValue` → logbench `DecodedValue`.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use logbench_core::types::{DecodedValue, ParamKind};

/// Runtime alloy type for a supported parameter kind.
pub fn to_dyn_type(kind: ParamKind) -> DynSolType {
    match kind {
        ParamKind::Address => DynSolType::Address,
        ParamKind::Uint(bits) => DynSolType::Uint(bits as usize),
        ParamKind::Bool => DynSolType::Bool,
        ParamKind::FixedBytes(n) => DynSolType::FixedBytes(n as usize),
    }
}

/// Convert a decoded `DynSolValue`. Returns `None` for value shapes outside
/// the fixed-width subset, which a supported schema never produces.
pub fn normalize(val: DynSolValue) -> Option<DecodedValue> {
    match val {
        DynSolValue::Address(a) => Some(DecodedValue::Address(a)),
        DynSolValue::Uint(u, _bits) => Some(DecodedValue::Uint(u)),
        DynSolValue::Bool(b) => Some(DecodedValue::Bool(b)),
        DynSolValue::FixedBytes(word, size) => Some(DecodedValue::FixedBytes(word[..size].to_vec())),
        _ => None,
    }
}

/// A `bool` slot is true when its low byte is nonzero. alloy's decoder reads
/// any nonzero word as `true`, so bool values are re-read from the raw word.
pub fn low_byte_bool(kind: ParamKind, word: &[u8], value: DecodedValue) -> DecodedValue {
    match kind {
        ParamKind::Bool => DecodedValue::Bool(word.last().is_some_and(|b| *b != 0)),
        _ => value,
    }
}
