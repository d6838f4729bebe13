//! `DynAbiDecoder`: the interpreted decoder.
//!
//! Parameter types are resolved to alloy `DynSolType`s on every call and the
//! words are handed to alloy's ABI decoder, so each decode pays the cost of
//! runtime type interpretation.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use logbench_core::{
    decoder::{resolve_entry, LogDecoder},
    event::{DecodeOutcome, DecodedEvent, RawLog},
    fingerprint,
    schema::EventSchemaTable,
    types::{DecodedValue, ParamKind},
};

use crate::normalizer;

/// Thread-safe, stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynAbiDecoder;

impl DynAbiDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a single indexed topic (always 32 bytes, ABI-encoded).
    fn decode_topic(topic: &str, kind: ParamKind) -> Result<DecodedValue, String> {
        let bytes = fingerprint::parse_data(topic).map_err(|e| format!("invalid topic hex: {e}"))?;
        if bytes.len() != 32 {
            return Err(format!("topic is {} bytes, expected 32", bytes.len()));
        }
        let ty = normalizer::to_dyn_type(kind);
        let value = ty.abi_decode(&bytes).map_err(|e| format!("topic decode: {e}"))?;
        let value = normalizer::normalize(value)
            .ok_or_else(|| format!("unsupported topic value for {}", ty.sol_type_name()))?;
        Ok(normalizer::low_byte_bool(kind, &bytes, value))
    }

    /// Decode the data payload as an ABI-encoded tuple of static types.
    fn decode_data(data: &[u8], kinds: &[ParamKind]) -> Result<Vec<DecodedValue>, String> {
        if kinds.is_empty() {
            return Ok(Vec::new());
        }

        let types = kinds.iter().map(|k| normalizer::to_dyn_type(*k)).collect();
        let decoded = DynSolType::Tuple(types)
            .abi_decode(data)
            .map_err(|e| format!("data decode: {e}"))?;
        let values = match decoded {
            DynSolValue::Tuple(vals) => vals,
            other => vec![other],
        };

        values
            .into_iter()
            .zip(kinds.iter().zip(data.chunks_exact(32)))
            .map(|(v, (kind, word))| {
                normalizer::normalize(v)
                    .map(|v| normalizer::low_byte_bool(*kind, word, v))
                    .ok_or_else(|| "unsupported data value".to_string())
            })
            .collect()
    }
}

impl LogDecoder for DynAbiDecoder {
    fn name(&self) -> &'static str {
        "dyn-abi"
    }

    fn decode(&self, log: &RawLog, table: &EventSchemaTable, hint: Option<&str>) -> DecodeOutcome {
        let entry = match resolve_entry(log, table, hint) {
            Ok(entry) => entry,
            Err(outcome) => return outcome,
        };

        let mut indexed_values = Vec::with_capacity(log.topics.len() - 1);
        for (param, topic) in entry.indexed_params().zip(&log.topics[1..]) {
            match Self::decode_topic(topic, param.kind) {
                Ok(v) => indexed_values.push(v),
                Err(reason) => return DecodeOutcome::Malformed(reason),
            }
        }

        let data = match fingerprint::parse_data(&log.data) {
            Ok(data) => data,
            Err(e) => return DecodeOutcome::Malformed(format!("invalid data hex: {e}")),
        };
        // alloy tolerates trailing bytes; the stride layout does not.
        if data.len() != entry.expected_data_len() {
            return DecodeOutcome::Malformed(format!(
                "{} expects {} data bytes, log has {}",
                entry.name,
                entry.expected_data_len(),
                data.len()
            ));
        }

        let kinds: Vec<ParamKind> = entry.data_params().map(|p| p.kind).collect();
        let data_values = match Self::decode_data(&data, &kinds) {
            Ok(values) => values,
            Err(reason) => return DecodeOutcome::Malformed(reason),
        };

        DecodeOutcome::Decoded(DecodedEvent {
            event_name: entry.name.clone(),
            indexed_values,
            data_values,
        })
    }
}
