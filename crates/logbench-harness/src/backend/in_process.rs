//! In-process interpreted backend.
//!
//! The harness side owns the loop: it loads the schema table and the input
//! logs, then hands the decoder one `RawLog` per call through
//! `LogDecoder::decode_all`. Only the loop is timed.

use logbench_core::{
    corpus,
    decoder::{DecodeReport, LogDecoder},
    schema::EventSchemaTable,
};
use logbench_evm::DynAbiDecoder;
use std::time::Instant;
use tracing::debug;

use super::{BackendJob, DecoderBackend};
use crate::error::BackendError;

pub struct DynAbiBackend {
    decoder: DynAbiDecoder,
}

impl DynAbiBackend {
    pub fn new() -> Self {
        Self {
            decoder: DynAbiDecoder::new(),
        }
    }
}

impl Default for DynAbiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderBackend for DynAbiBackend {
    fn name(&self) -> &str {
        "dyn-abi"
    }

    fn run(&self, job: &BackendJob) -> Result<DecodeReport, BackendError> {
        let table = EventSchemaTable::from_path(&job.schema_path)?;
        let hint = job.event.as_deref();
        if let Some(name) = hint {
            table.require(name)?;
        }
        let logs = corpus::load(&job.input_path)?;
        debug!("dyn-abi: decoding {} logs", logs.len());

        let start = Instant::now();
        let tally = self.decoder.decode_all(&logs, &table, hint);
        let elapsed = start.elapsed();

        Ok(DecodeReport {
            tally,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        })
    }
}
