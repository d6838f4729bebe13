//! `StrideDecoder`: the native fixed-stride decoder.
//!
//! Every supported parameter occupies one 32-byte word, so decoding is a walk
//! over topics[1..] followed by a walk over `data` in 32-byte strides.

use alloy_primitives::{Address, B256, U256};
use logbench_core::{
    decoder::{resolve_entry, LogDecoder},
    event::{DecodeOutcome, DecodedEvent, RawLog},
    fingerprint,
    schema::EventSchemaTable,
    types::{DecodedValue, ParamKind},
};

/// Thread-safe, stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrideDecoder;

impl StrideDecoder {
    pub fn new() -> Self {
        Self
    }
}

/// Interpret one 32-byte word as `kind`.
pub fn decode_word(word: &[u8; 32], kind: ParamKind) -> DecodedValue {
    match kind {
        ParamKind::Address => DecodedValue::Address(Address::from_slice(&word[12..])),
        ParamKind::Uint(_) => DecodedValue::Uint(U256::from_be_bytes(*word)),
        ParamKind::Bool => DecodedValue::Bool(word[31] != 0),
        ParamKind::FixedBytes(n) => DecodedValue::FixedBytes(word[..n as usize].to_vec()),
    }
}

impl LogDecoder for StrideDecoder {
    fn name(&self) -> &'static str {
        "stride"
    }

    fn decode(&self, log: &RawLog, table: &EventSchemaTable, hint: Option<&str>) -> DecodeOutcome {
        let entry = match resolve_entry(log, table, hint) {
            Ok(entry) => entry,
            Err(outcome) => return outcome,
        };

        let mut indexed_values = Vec::with_capacity(log.topics.len() - 1);
        for (param, topic) in entry.indexed_params().zip(&log.topics[1..]) {
            let Some(word) = fingerprint::parse_word(topic) else {
                return DecodeOutcome::Malformed(format!("invalid topic '{topic}'"));
            };
            indexed_values.push(decode_word(&word.0, param.kind));
        }

        let data = match fingerprint::parse_data(&log.data) {
            Ok(data) => data,
            Err(e) => return DecodeOutcome::Malformed(format!("invalid data hex: {e}")),
        };
        if data.len() != entry.expected_data_len() {
            return DecodeOutcome::Malformed(format!(
                "{} expects {} data bytes, log has {}",
                entry.name,
                entry.expected_data_len(),
                data.len()
            ));
        }

        let data_values = entry
            .data_params()
            .zip(data.chunks_exact(32))
            .map(|(param, chunk)| {
                let word = B256::from_slice(chunk);
                decode_word(&word.0, param.kind)
            })
            .collect();

        DecodeOutcome::Decoded(DecodedEvent {
            event_name: entry.name.clone(),
            indexed_values,
            data_values,
        })
    }
}
