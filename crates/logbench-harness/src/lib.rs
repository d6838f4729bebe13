//! # logbench-harness
//!
//! Runs several decoder backends over the same sample of a log corpus and
//! produces comparable throughput summaries.
//!
//! ## Guarantees
//! - Every backend reads the same sample artifact, byte for byte
//! - Every backend gets one untimed warmup pass before timing starts
//! - Backends run one after another, never concurrently
//! - Diverging decode counts abort the run
//!
//! ## Usage
//! ```no_run
//! use logbench_harness::{config::HarnessConfig, runner::Harness, sink::ResultSink};
//!
//! let config = HarnessConfig::default();
//! let summary = Harness::from_config(&config).run().unwrap();
//! ResultSink::new(&config.results).append(&summary).unwrap();
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod runner;
pub mod sample;
pub mod sink;
pub mod summary;
pub mod synth;

pub use backend::{BackendJob, DecoderBackend};
pub use config::{BackendKind, BenchMode, HarnessConfig};
pub use error::{BackendError, HarnessError};
pub use runner::Harness;
pub use sink::ResultSink;
pub use summary::{BackendSummary, BenchmarkRun, BenchmarkSummary};
