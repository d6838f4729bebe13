//! # logbench-observability
//!
//! Structured logging for logbench binaries.
//!
//! Logs always go to stderr: stdout carries decoded records and per-backend
//! result lines. JSON output is available for log shippers (ELK, Loki).

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
