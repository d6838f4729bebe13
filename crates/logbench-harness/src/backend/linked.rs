//! In-process linked backend: a single call into the file-level entry point.

use logbench_core::decoder::DecodeReport;
use logbench_evm::decode_file;

use super::{BackendJob, DecoderBackend};
use crate::error::BackendError;

#[derive(Debug, Default)]
pub struct LinkedBackend;

impl LinkedBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DecoderBackend for LinkedBackend {
    fn name(&self) -> &str {
        "linked"
    }

    fn run(&self, job: &BackendJob) -> Result<DecodeReport, BackendError> {
        Ok(decode_file(&job.schema_path, job.event_or_empty(), &job.input_path)?)
    }
}
