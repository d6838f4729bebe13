//! # logbench-core
//!
//! Core types shared by every logbench crate: raw logs as read from a corpus,
//! the event schema table built from an ABI file, typed decode results, and
//! the `LogDecoder` contract each decoder implementation satisfies.

pub mod corpus;
pub mod decoder;
pub mod error;
pub mod event;
pub mod fingerprint;
pub mod schema;
pub mod types;

pub use decoder::{resolve_entry, DecodeReport, LogDecoder};
pub use error::{CorpusError, LoadError, SchemaError};
pub use event::{DecodeOutcome, DecodeTally, DecodedEvent, RawLog};
pub use schema::{EventSchemaEntry, EventSchemaTable, ParamSpec};
pub use types::{DecodedValue, ParamKind};
