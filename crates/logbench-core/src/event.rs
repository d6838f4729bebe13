//! Raw and decoded log types.

use crate::schema::EventSchemaEntry;
use crate::types::DecodedValue;
use serde::{Deserialize, Serialize};

/// A raw, undecoded log as read from one corpus line.
/// This is the input to every decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// topics[0] is the event signature hash; topics[1..] are indexed params.
    pub topics: Vec<String>,
    /// Non-indexed params, hex-encoded with `0x` prefix.
    pub data: String,
}

impl RawLog {
    /// Returns topics[0], if present.
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}

/// A fully decoded log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    /// Name of the matched schema entry, e.g. "Transfer"
    pub event_name: String,
    /// Values read from topics[1..], in declaration order
    pub indexed_values: Vec<DecodedValue>,
    /// Values read from the data payload, in declaration order
    pub data_values: Vec<DecodedValue>,
}

impl DecodedEvent {
    /// Render as `{"event": name, "args": {param: value, ...}}` using the
    /// declared parameter order. Unnamed params become `arg<i>`.
    pub fn to_json(&self, entry: &EventSchemaEntry) -> serde_json::Value {
        let mut indexed = self.indexed_values.iter();
        let mut data = self.data_values.iter();
        let mut args = serde_json::Map::new();

        for (i, param) in entry.inputs.iter().enumerate() {
            let value = if param.indexed { indexed.next() } else { data.next() };
            let key = if param.name.is_empty() {
                format!("arg{i}")
            } else {
                param.name.clone()
            };
            let value = value
                .and_then(|v| serde_json::to_value(v).ok())
                .unwrap_or(serde_json::Value::Null);
            args.insert(key, value);
        }

        serde_json::json!({ "event": self.event_name, "args": args })
    }
}

/// Result of decoding one log against a schema table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Decoded(DecodedEvent),
    /// topic0 does not match any schema entry. Expected in multi-event mode.
    NoMatchingSchema,
    /// Topic count, data length or hex encoding disagree with the entry.
    Malformed(String),
}

impl DecodeOutcome {
    pub fn into_event(self) -> Option<DecodedEvent> {
        match self {
            DecodeOutcome::Decoded(event) => Some(event),
            _ => None,
        }
    }
}

/// Aggregate counts over a batch of decode calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeTally {
    pub decoded: u64,
    pub no_match: u64,
    pub malformed: u64,
}

impl DecodeTally {
    pub fn record(&mut self, outcome: &DecodeOutcome) {
        match outcome {
            DecodeOutcome::Decoded(_) => self.decoded += 1,
            DecodeOutcome::NoMatchingSchema => self.no_match += 1,
            DecodeOutcome::Malformed(_) => self.malformed += 1,
        }
    }

    pub fn skipped(&self) -> u64 {
        self.no_match + self.malformed
    }

    pub fn total(&self) -> u64 {
        self.decoded + self.skipped()
    }
}
