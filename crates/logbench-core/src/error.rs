//! Error types for schema loading and corpus reading.
//!
//! Per-record decode failures are not errors: they are reported through
//! `DecodeOutcome` and tallied. Everything here is fatal for the enclosing run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an ABI file into an `EventSchemaTable`.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("cannot read ABI file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported ABI JSON structure: {reason}")]
    UnsupportedLayout { reason: String },

    #[error("no supported events found in ABI")]
    NoEvents,

    #[error("event '{name}' not found in ABI")]
    EventNotFound { name: String },
}

/// Errors raised while reading a newline-delimited log corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log at line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}

/// Anything that can stop a file-level decode before the timer starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}
