//! Golden fixture integration tests.
//!
//! Each test loads a hand-written log from `fixtures/`, decodes it with both
//! decoders against the bundled ABI files, and compares against the expected
//! values recorded in the fixture JSON.

use logbench_core::{
    decoder::LogDecoder,
    event::{DecodeOutcome, RawLog},
    schema::EventSchemaTable,
};
use logbench_evm::{DynAbiDecoder, StrideDecoder};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// The fixtures live two levels above the crate root.
fn fixture(name: &str) -> serde_json::Value {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures");
    p.push(name);
    let json = std::fs::read_to_string(&p).expect("fixture not found");
    serde_json::from_str(&json).unwrap()
}

/// The schemas live two levels above the crate root.
fn schema(name: &str) -> EventSchemaTable {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../schemas");
    p.push(name);
    EventSchemaTable::from_path(&p).expect("schema load failed")
}

fn raw_log(f: &serde_json::Value) -> RawLog {
    RawLog {
        topics: f["topics"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect(),
        data: f["data"].as_str().unwrap().to_string(),
    }
}

fn strings(v: &serde_json::Value) -> Vec<String> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

fn decoders() -> Vec<Box<dyn LogDecoder>> {
    vec![Box::new(StrideDecoder::new()), Box::new(DynAbiDecoder::new())]
}

fn assert_golden(fixture_name: &str, schema_name: &str) {
    let f = fixture(fixture_name);
    let table = schema(schema_name);
    let raw = raw_log(&f);

    for decoder in decoders() {
        for hint in [None, f["event"].as_str()] {
            let event = decoder
                .decode(&raw, &table, hint)
                .into_event()
                .unwrap_or_else(|| panic!("{} failed on {fixture_name}", decoder.name()));

            assert_eq!(event.event_name, f["event"].as_str().unwrap());
            let indexed: Vec<String> = event.indexed_values.iter().map(|v| v.to_string()).collect();
            let data: Vec<String> = event.data_values.iter().map(|v| v.to_string()).collect();
            assert_eq!(indexed, strings(&f["expectedIndexed"]), "{}", decoder.name());
            assert_eq!(data, strings(&f["expectedData"]), "{}", decoder.name());
        }
    }
}

// ─── ERC-20 ───────────────────────────────────────────────────────────────────

#[test]
fn erc20_transfer_golden() {
    assert_golden("erc20-transfer.json", "erc20.json");
}

#[test]
fn erc20_transfer_golden_multi_schema() {
    assert_golden("erc20-transfer.json", "multi.json");
}

#[test]
fn erc20_approval_golden() {
    assert_golden("erc20-approval.json", "erc20.json");
}

#[test]
fn transfer_json_rendering_uses_param_names() {
    let f = fixture("erc20-transfer.json");
    let table = schema("erc20.json");
    let event = StrideDecoder::new()
        .decode(&raw_log(&f), &table, None)
        .into_event()
        .unwrap();
    let json = event.to_json(table.get_by_name("Transfer").unwrap());
    assert_eq!(
        json,
        serde_json::json!({
            "event": "Transfer",
            "args": {
                "from": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "to": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "value": "1000"
            }
        })
    );
}

// ─── Mismatch handling ────────────────────────────────────────────────────────

#[test]
fn approval_routed_but_forced_as_swap_is_malformed() {
    let f = fixture("erc20-approval.json");
    let table = schema("multi.json");
    let raw = raw_log(&f);
    for decoder in decoders() {
        assert!(matches!(
            decoder.decode(&raw, &table, Some("Swap")),
            DecodeOutcome::Malformed(_)
        ));
    }
}

#[test]
fn four_topic_log_matches_nothing() {
    let table = schema("multi.json");
    let raw = RawLog {
        topics: vec![format!("0x{}", "42".repeat(32)); 4],
        data: "0x".into(),
    };
    for decoder in decoders() {
        assert_eq!(decoder.decode(&raw, &table, None), DecodeOutcome::NoMatchingSchema);
        assert!(matches!(
            decoder.decode(&raw, &table, Some("Transfer")),
            DecodeOutcome::Malformed(_)
        ));
    }
}
