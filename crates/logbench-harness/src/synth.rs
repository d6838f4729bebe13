//! Deterministic synthetic corpora.
//!
//! Every generated line comes with the values it encodes, so decoders can be
//! checked for exact round-trips. The same `(count, seed, mix)` always
//! produces the same lines.

use alloy_primitives::{Address, U256};
use clap::ValueEnum;
use logbench_core::{
    event::RawLog,
    schema::{EventSchemaEntry, ParamSpec},
    types::{DecodedValue, ParamKind},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::HarnessError;

/// In multi mix, every `UNKNOWN_EVERY`-th line is an event no schema knows.
pub const UNKNOWN_EVERY: usize = 20;

/// Which events a generated corpus contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthMix {
    /// ERC-20 `Transfer` only
    #[default]
    Single,
    /// `Transfer`, `Approval` and `Swap` in rotation, plus unknown `Sync` logs
    Multi,
}

/// One generated log and the values it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticLog {
    pub log: RawLog,
    /// Event name, as it appears in `schemas/multi.json`
    pub event: String,
    /// `false` for events absent from the bundled schemas
    pub known: bool,
    pub indexed: Vec<DecodedValue>,
    pub data: Vec<DecodedValue>,
}

fn transfer() -> EventSchemaEntry {
    EventSchemaEntry::new(
        "Transfer",
        vec![
            ParamSpec::new("from", ParamKind::Address, true),
            ParamSpec::new("to", ParamKind::Address, true),
            ParamSpec::new("value", ParamKind::Uint(256), false),
        ],
    )
}

fn approval() -> EventSchemaEntry {
    EventSchemaEntry::new(
        "Approval",
        vec![
            ParamSpec::new("owner", ParamKind::Address, true),
            ParamSpec::new("spender", ParamKind::Address, true),
            ParamSpec::new("value", ParamKind::Uint(256), false),
        ],
    )
}

fn swap() -> EventSchemaEntry {
    EventSchemaEntry::new(
        "Swap",
        vec![
            ParamSpec::new("sender", ParamKind::Address, true),
            ParamSpec::new("recipient", ParamKind::Address, true),
            ParamSpec::new("amountIn", ParamKind::Uint(256), false),
            ParamSpec::new("amountOut", ParamKind::Uint(256), false),
            ParamSpec::new("zeroForOne", ParamKind::Bool, false),
            ParamSpec::new("poolId", ParamKind::FixedBytes(32), false),
        ],
    )
}

// Uniswap V2 pair reserves update; deliberately missing from every schema file.
fn sync() -> EventSchemaEntry {
    EventSchemaEntry::new(
        "Sync",
        vec![
            ParamSpec::new("reserve0", ParamKind::Uint(112), false),
            ParamSpec::new("reserve1", ParamKind::Uint(112), false),
        ],
    )
}

/// Encode a value into its 32-byte ABI slot.
pub fn encode_word(value: &DecodedValue) -> [u8; 32] {
    let mut word = [0u8; 32];
    match value {
        DecodedValue::Address(a) => word[12..].copy_from_slice(a.as_slice()),
        DecodedValue::Uint(v) => word = v.to_be_bytes::<32>(),
        DecodedValue::Bool(b) => word[31] = u8::from(*b),
        DecodedValue::FixedBytes(bytes) => word[..bytes.len()].copy_from_slice(bytes),
    }
    word
}

fn random_value(rng: &mut ChaCha20Rng, kind: ParamKind) -> DecodedValue {
    match kind {
        ParamKind::Address => DecodedValue::Address(Address::from(rng.gen::<[u8; 20]>())),
        ParamKind::Uint(bits) => {
            let full = U256::from_be_bytes(rng.gen::<[u8; 32]>());
            DecodedValue::Uint(full >> (256 - bits as usize))
        }
        ParamKind::Bool => DecodedValue::Bool(rng.gen_bool(0.5)),
        ParamKind::FixedBytes(n) => {
            let bytes: [u8; 32] = rng.gen();
            DecodedValue::FixedBytes(bytes[..n as usize].to_vec())
        }
    }
}

fn hex_word(word: &[u8]) -> String {
    format!("0x{}", hex::encode(word))
}

fn synthesize(rng: &mut ChaCha20Rng, entry: &EventSchemaEntry, known: bool) -> SyntheticLog {
    let indexed: Vec<DecodedValue> = entry
        .indexed_params()
        .map(|p| random_value(rng, p.kind))
        .collect();
    let data: Vec<DecodedValue> = entry
        .data_params()
        .map(|p| random_value(rng, p.kind))
        .collect();

    let mut topics = Vec::with_capacity(entry.expected_topics());
    topics.push(hex_word(entry.signature_hash.as_slice()));
    topics.extend(indexed.iter().map(|v| hex_word(&encode_word(v))));

    let payload: Vec<u8> = data.iter().flat_map(encode_word).collect();

    SyntheticLog {
        log: RawLog {
            topics,
            data: hex_word(&payload),
        },
        event: entry.name.clone(),
        known,
        indexed,
        data,
    }
}

/// Generate `count` logs from `seed`.
pub fn generate(count: usize, seed: u64, mix: SynthMix) -> Vec<SyntheticLog> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let rotation = [transfer(), approval(), swap()];
    let unknown = sync();

    (0..count)
        .map(|i| match mix {
            SynthMix::Single => synthesize(&mut rng, &rotation[0], true),
            SynthMix::Multi if i % UNKNOWN_EVERY == UNKNOWN_EVERY - 1 => synthesize(&mut rng, &unknown, false),
            SynthMix::Multi => synthesize(&mut rng, &rotation[i % rotation.len()], true),
        })
        .collect()
}

/// Write generated logs as a JSONL corpus, replacing `path`.
pub fn write_corpus(path: &Path, logs: &[SyntheticLog]) -> Result<(), HarnessError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| HarnessError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let io_err = |source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = std::io::BufWriter::new(fs::File::create(path).map_err(io_err)?);
    for synthetic in logs {
        serde_json::to_writer(&mut out, &synthetic.log)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    info!("synth: wrote {} logs to {}", logs.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbench_core::{corpus, decoder::LogDecoder, event::DecodeOutcome, schema::EventSchemaTable};
    use logbench_evm::{DynAbiDecoder, StrideDecoder};

    fn multi_table() -> EventSchemaTable {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../schemas/multi.json");
        EventSchemaTable::from_path(&path).unwrap()
    }

    #[test]
    fn same_seed_same_corpus() {
        assert_eq!(generate(64, 7, SynthMix::Multi), generate(64, 7, SynthMix::Multi));
        assert_ne!(generate(8, 7, SynthMix::Single), generate(8, 8, SynthMix::Single));
    }

    #[test]
    fn signature_hashes_match_bundled_schema() {
        let table = multi_table();
        for entry in [transfer(), approval(), swap()] {
            let bundled = table.get_by_name(&entry.name).unwrap();
            assert_eq!(bundled.signature_hash, entry.signature_hash, "{}", entry.name);
        }
        assert!(table.get_by_hash(&sync().signature_hash).is_none());
    }

    #[test]
    fn multi_mix_rotates_and_injects_unknown_events() {
        let logs = generate(40, 1, SynthMix::Multi);
        assert_eq!(logs[0].event, "Transfer");
        assert_eq!(logs[1].event, "Approval");
        assert_eq!(logs[2].event, "Swap");
        assert_eq!(logs[19].event, "Sync");
        assert!(!logs[19].known);
        assert_eq!(logs.iter().filter(|l| !l.known).count(), 2);
    }

    #[test]
    fn decoded_values_round_trip() {
        let table = multi_table();
        let logs = generate(200, 42, SynthMix::Multi);
        let decoders: [&dyn LogDecoder; 2] = [&StrideDecoder, &DynAbiDecoder];
        for decoder in decoders {
            for synthetic in &logs {
                match decoder.decode(&synthetic.log, &table, None) {
                    DecodeOutcome::Decoded(event) => {
                        assert!(synthetic.known, "{}", decoder.name());
                        assert_eq!(event.event_name, synthetic.event, "{}", decoder.name());
                        assert_eq!(event.indexed_values, synthetic.indexed, "{}", decoder.name());
                        assert_eq!(event.data_values, synthetic.data, "{}", decoder.name());
                    }
                    DecodeOutcome::NoMatchingSchema => assert!(!synthetic.known, "{}", decoder.name()),
                    DecodeOutcome::Malformed(reason) => {
                        panic!("{}: malformed synthetic log: {reason}", decoder.name())
                    }
                }
            }
        }
    }

    #[test]
    fn uint_values_respect_their_width() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..50 {
            let value = random_value(&mut rng, ParamKind::Uint(112)).as_uint().unwrap();
            assert!(value.bit_len() <= 112);
        }
    }

    #[test]
    fn written_corpus_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/logs.jsonl");
        let logs = generate(25, 9, SynthMix::Single);
        write_corpus(&path, &logs).unwrap();

        let loaded = corpus::load(&path).unwrap();
        assert_eq!(loaded.len(), 25);
        assert_eq!(loaded[3], logs[3].log);
    }
}
