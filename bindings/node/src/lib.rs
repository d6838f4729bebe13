//! # logbench-node
//!
//! Node.js binding for the file-level decode entry point, so a JavaScript
//! harness can time the same native decoder as the linked backend.
//!
//! ## Usage (JavaScript)
//! ```javascript
//! const { decodeFile } = require('@logbench/node');
//!
//! // Empty event name = route every log on topics[0].
//! const { decoded, elapsedMs } = decodeFile('schemas/erc20.json', 'Transfer', 'sample.jsonl');
//! ```

#![deny(clippy::all)]

use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::path::Path;

#[napi(object)]
pub struct DecodeResult {
    pub decoded: u32,
    /// Decode time only; file loading is excluded
    pub elapsed_ms: f64,
    pub no_match: u32,
    pub malformed: u32,
}

/// Decode every log in `input_path` against `abi_path`.
///
/// Throws on schema or input errors; per-log failures are only counted.
#[napi]
pub fn decode_file(abi_path: String, event_name: String, input_path: String) -> Result<DecodeResult> {
    let report = logbench_evm::decode_file(Path::new(&abi_path), &event_name, Path::new(&input_path))
        .map_err(|e| Error::from_reason(e.to_string()))?;

    let count = |n: u64| u32::try_from(n).unwrap_or(u32::MAX);
    Ok(DecodeResult {
        decoded: count(report.tally.decoded),
        elapsed_ms: report.elapsed_ms,
        no_match: count(report.tally.no_match),
        malformed: count(report.tally.malformed),
    })
}
