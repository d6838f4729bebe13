//! Decoder backends.
//!
//! A backend turns a `BackendJob` (schema file, optional event hint, input
//! file) into a `DecodeReport` whose `elapsed_ms` is measured inside the
//! backend. The harness measures wall time around the call separately.

pub mod in_process;
pub mod linked;
pub mod subprocess;

use logbench_core::decoder::DecodeReport;
use std::path::PathBuf;

use crate::config::{BackendKind, HarnessConfig};
use crate::error::BackendError;

pub use in_process::DynAbiBackend;
pub use linked::LinkedBackend;
pub use subprocess::SubprocessBackend;

/// One decode request, identical for every backend in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendJob {
    pub schema_path: PathBuf,
    /// `None` = multi-event mode
    pub event: Option<String>,
    pub input_path: PathBuf,
}

impl BackendJob {
    pub fn new(schema_path: impl Into<PathBuf>, event: Option<&str>, input_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            event: event.map(str::to_string),
            input_path: input_path.into(),
        }
    }

    /// The hint as the linked entry point expects it: empty = multi-event.
    pub fn event_or_empty(&self) -> &str {
        self.event.as_deref().unwrap_or("")
    }
}

/// A decoder implementation the harness can time.
pub trait DecoderBackend {
    fn name(&self) -> &str;

    /// Decode the whole input once. Blocks until done; no timeout.
    fn run(&self, job: &BackendJob) -> Result<DecodeReport, BackendError>;
}

/// Instantiate the backend for `kind`.
pub fn build(kind: BackendKind, config: &HarnessConfig) -> Box<dyn DecoderBackend> {
    match kind {
        BackendKind::DynAbi => Box::new(DynAbiBackend::new()),
        BackendKind::Linked => Box::new(LinkedBackend::new()),
        BackendKind::Subprocess => Box::new(SubprocessBackend::new(config.decoder_bin.clone())),
    }
}
