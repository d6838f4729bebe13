//! The `LogDecoder` contract and the routing step every decoder shares.
//!
//! Routing (which schema entry applies to a log) and shape checks are common
//! to all decoders so that implementations differ only in how they turn
//! 32-byte words into typed values.

use crate::event::{DecodeOutcome, DecodeTally, RawLog};
use crate::fingerprint;
use crate::schema::{EventSchemaEntry, EventSchemaTable};
use serde::{Deserialize, Serialize};

/// A decoder implementation.
///
/// # Determinism
/// `decode` must be referentially transparent: the same log and table always
/// produce the same outcome, independent of earlier calls.
pub trait LogDecoder: Send + Sync {
    /// Short identifier used in reports, e.g. "stride".
    fn name(&self) -> &'static str;

    /// Decode one log. With `hint`, the named entry is used regardless of
    /// topics[0]; without it, topics[0] selects the entry.
    fn decode(&self, log: &RawLog, table: &EventSchemaTable, hint: Option<&str>) -> DecodeOutcome;

    /// Decode every log, keeping only counts.
    fn decode_all(&self, logs: &[RawLog], table: &EventSchemaTable, hint: Option<&str>) -> DecodeTally {
        let mut tally = DecodeTally::default();
        for log in logs {
            let outcome = self.decode(log, table, hint);
            tally.record(&outcome);
            std::hint::black_box(outcome);
        }
        tally
    }
}

/// Aggregate result of a file-level decode, timed inside the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodeReport {
    #[serde(flatten)]
    pub tally: DecodeTally,
    /// Decode time only; schema and input loading are excluded.
    pub elapsed_ms: f64,
}

/// Pick the schema entry for a log and check its topic count.
///
/// Returns the outcome to report instead when no entry applies.
pub fn resolve_entry<'t>(
    log: &RawLog,
    table: &'t EventSchemaTable,
    hint: Option<&str>,
) -> Result<&'t EventSchemaEntry, DecodeOutcome> {
    let entry = match hint {
        Some(name) => table
            .get_by_name(name)
            .ok_or_else(|| DecodeOutcome::Malformed(format!("event '{name}' is not in the schema table")))?,
        None => {
            let topic0 = log
                .topic0()
                .ok_or_else(|| DecodeOutcome::Malformed("log has no topics".into()))?;
            let hash = fingerprint::parse_word(topic0)
                .ok_or_else(|| DecodeOutcome::Malformed(format!("invalid topic0 '{topic0}'")))?;
            table.get_by_hash(&hash).ok_or(DecodeOutcome::NoMatchingSchema)?
        }
    };

    if log.topics.len() != entry.expected_topics() {
        return Err(DecodeOutcome::Malformed(format!(
            "{} expects {} topics, log has {}",
            entry.name,
            entry.expected_topics(),
            log.topics.len()
        )));
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamSpec;
    use crate::types::ParamKind;

    fn table() -> EventSchemaTable {
        let mut table = EventSchemaTable::new();
        table.insert(EventSchemaEntry::new(
            "Transfer",
            vec![
                ParamSpec::new("from", ParamKind::Address, true),
                ParamSpec::new("to", ParamKind::Address, true),
                ParamSpec::new("value", ParamKind::Uint(256), false),
            ],
        ));
        table
    }

    fn transfer_topic0() -> String {
        format!("{:#x}", table().entries()[0].signature_hash)
    }

    fn zero_topic() -> String {
        format!("0x{}", "00".repeat(32))
    }

    #[test]
    fn resolves_by_topic0() {
        let log = RawLog {
            topics: vec![transfer_topic0(), zero_topic(), zero_topic()],
            data: "0x".into(),
        };
        let table = table();
        assert_eq!(resolve_entry(&log, &table, None).unwrap().name, "Transfer");
    }

    #[test]
    fn unknown_topic0_is_no_match() {
        let log = RawLog {
            topics: vec![zero_topic()],
            data: "0x".into(),
        };
        assert_eq!(
            resolve_entry(&log, &table(), None).unwrap_err(),
            DecodeOutcome::NoMatchingSchema
        );
    }

    #[test]
    fn hint_ignores_topic0_but_checks_shape() {
        let table = table();
        let log = RawLog {
            topics: vec![zero_topic(), zero_topic(), zero_topic()],
            data: "0x".into(),
        };
        assert_eq!(resolve_entry(&log, &table, Some("Transfer")).unwrap().name, "Transfer");

        let short = RawLog {
            topics: vec![zero_topic()],
            data: "0x".into(),
        };
        assert!(matches!(
            resolve_entry(&short, &table, Some("Transfer")),
            Err(DecodeOutcome::Malformed(_))
        ));
    }

    #[test]
    fn empty_topics_are_malformed() {
        let log = RawLog {
            topics: vec![],
            data: "0x".into(),
        };
        assert!(matches!(
            resolve_entry(&log, &table(), None),
            Err(DecodeOutcome::Malformed(_))
        ));
    }
}
