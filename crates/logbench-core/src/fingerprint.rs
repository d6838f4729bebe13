//! Event signature hashing and topic parsing.
//!
//! The signature hash of an event is the keccak256 hash of its canonical
//! signature string, e.g.:
//!   keccak256("Transfer(address,address,uint256)")
//!   → 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef
//!
//! For raw logs, topics[0] IS the hash; we only recompute it for schemas.

use alloy_primitives::B256;
use tiny_keccak::{Hasher, Keccak};

/// Compute the keccak256 hash of an event signature string.
/// Input: `"EventName(type1,type2,...)"`, the canonical ABI signature.
pub fn keccak256_signature(signature: &str) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    B256::from(output)
}

/// Parse a 32-byte topic. The `0x` prefix is optional; anything other than
/// exactly 64 hex digits is rejected.
pub fn parse_word(topic: &str) -> Option<B256> {
    let hex = topic.strip_prefix("0x").unwrap_or(topic);
    if hex.len() != 64 {
        return None;
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(hex, &mut out).ok()?;
    Some(B256::from(out))
}

/// Decode a `0x`-prefixed (or bare) hex data payload.
pub fn parse_data(data: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(data.strip_prefix("0x").unwrap_or(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc20_transfer_fingerprint() {
        let fp = keccak256_signature("Transfer(address,address,uint256)");
        assert_eq!(
            format!("{fp:#x}"),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn erc20_approval_fingerprint() {
        let fp = keccak256_signature("Approval(address,address,uint256)");
        assert_eq!(
            format!("{fp:#x}"),
            "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"
        );
    }

    #[test]
    fn parse_word_rejects_short_and_non_hex() {
        assert!(parse_word("0x1234").is_none());
        assert!(parse_word(&format!("0x{}", "zz".repeat(32))).is_none());
        assert!(parse_word(&"00".repeat(32)).is_some());
    }

    #[test]
    fn parse_data_accepts_empty() {
        assert_eq!(parse_data("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_data("").unwrap(), Vec::<u8>::new());
    }
}
