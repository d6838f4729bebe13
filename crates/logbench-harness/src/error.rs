//! Error types for backend invocation and harness runs.
//!
//! Every variant here is fatal for the enclosing run; no partial summary is
//! emitted and nothing is retried.

use logbench_core::error::{CorpusError, LoadError, SchemaError};
use std::path::PathBuf;
use thiserror::Error;

/// A backend could not produce a report.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The decoder process failed to start or exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Invocation {
        program: PathBuf,
        /// Exit code, or a description when there is none
        status: String,
        stderr: String,
    },

    /// The decoder process exited cleanly but printed no aggregate line.
    #[error("no `decoded=<n> elapsed_ms=<t>` line in decoder output: {stderr}")]
    Protocol { stderr: String },
}

impl From<LoadError> for BackendError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Schema(e) => BackendError::Schema(e),
            LoadError::Corpus(e) => BackendError::Corpus(e),
        }
    }
}

/// Errors surfaced by `Harness::run` and the result sink.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("backend '{backend}' failed: {source}")]
    Backend {
        backend: String,
        #[source]
        source: BackendError,
    },

    #[error("backends disagree in iteration {iteration}: {details}")]
    Divergence { iteration: usize, details: String },

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
