//! File-level decode entry point used by the linked backend, the
//! `logbench-decode` binary and the Node.js binding.
//!
//! The timer starts after the schema and input are loaded and stops after the
//! last log is decoded, so library and file loading never show up in
//! `elapsed_ms`.

use logbench_core::{
    corpus,
    decoder::{DecodeReport, LogDecoder},
    error::LoadError,
    schema::EventSchemaTable,
};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::stride::StrideDecoder;

/// Decode every log in `input_path` with the native `StrideDecoder`.
///
/// An empty `event_name` selects multi-event mode (route on topic0).
pub fn decode_file(
    schema_path: &Path,
    event_name: &str,
    input_path: &Path,
) -> Result<DecodeReport, LoadError> {
    decode_file_with(&StrideDecoder::new(), schema_path, event_name, input_path)
}

/// Same as [`decode_file`] with an explicit decoder.
pub fn decode_file_with(
    decoder: &dyn LogDecoder,
    schema_path: &Path,
    event_name: &str,
    input_path: &Path,
) -> Result<DecodeReport, LoadError> {
    let table = EventSchemaTable::from_path(schema_path)?;
    let hint = (!event_name.is_empty()).then_some(event_name);
    if let Some(name) = hint {
        table.require(name)?;
    }
    let logs = corpus::load(input_path)?;

    debug!(
        "decode_file: {} logs, {} events, decoder={}",
        logs.len(),
        table.len(),
        decoder.name()
    );

    let start = Instant::now();
    let tally = decoder.decode_all(&logs, &table, hint);
    let elapsed = start.elapsed();

    Ok(DecodeReport {
        tally,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    })
}
