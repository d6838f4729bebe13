//! Harness configuration.
//!
//! Every knob has a default; the CLI fills them from flags or `LOGBENCH_*`
//! environment variables.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::HarnessError;

/// Warmup passes never read more than this many logs.
pub const WARMUP_CAP: usize = 5_000;

/// Which schema file is used and whether an event hint is passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchMode {
    /// ERC-20 ABI, every log decoded as `Transfer`.
    #[default]
    Single,
    /// Several events in one ABI, routed on topic0.
    Multi,
}

impl BenchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchMode::Single => "single",
            BenchMode::Multi => "multi",
        }
    }

    pub fn schema_file(&self) -> &'static str {
        match self {
            BenchMode::Single => "erc20.json",
            BenchMode::Multi => "multi.json",
        }
    }

    pub fn event_hint(&self) -> Option<&'static str> {
        match self {
            BenchMode::Single => Some("Transfer"),
            BenchMode::Multi => None,
        }
    }
}

impl fmt::Display for BenchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decoder backends the harness knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// In-process, one call per log, types interpreted through alloy dyn-abi.
    #[value(name = "dyn-abi")]
    DynAbi,
    /// In-process file-level entry point, native stride decoder.
    Linked,
    /// `logbench-decode` child process.
    Subprocess,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [BackendKind::DynAbi, BackendKind::Linked, BackendKind::Subprocess];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::DynAbi => "dyn-abi",
            BackendKind::Linked => "linked",
            BackendKind::Subprocess => "subprocess",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub mode: BenchMode,
    /// Logs taken from the front of the corpus
    pub batch_size: usize,
    /// Timed passes per backend
    pub iterations: usize,
    /// Corpus file (JSONL)
    pub input: PathBuf,
    /// Directory holding `erc20.json` and `multi.json`
    pub schema_dir: PathBuf,
    /// Result sink (JSONL, append-only)
    pub results: PathBuf,
    /// Where sample and warmup artifacts are written
    pub work_dir: PathBuf,
    /// `logbench-decode` executable for the subprocess backend
    pub decoder_bin: PathBuf,
    /// Backends in the order they run
    pub backends: Vec<BackendKind>,
    #[serde(default = "default_warmup_cap")]
    pub warmup_cap: usize,
}

fn default_warmup_cap() -> usize {
    WARMUP_CAP
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: BenchMode::Single,
            batch_size: 100_000,
            iterations: 5,
            input: PathBuf::from("data/logs.jsonl"),
            schema_dir: PathBuf::from("schemas"),
            results: PathBuf::from("results/bench.jsonl"),
            work_dir: PathBuf::from("target/logbench"),
            decoder_bin: PathBuf::from("logbench-decode"),
            backends: BackendKind::ALL.to_vec(),
            warmup_cap: WARMUP_CAP,
        }
    }
}

impl HarnessConfig {
    pub fn schema_path(&self) -> PathBuf {
        self.schema_dir.join(self.mode.schema_file())
    }

    pub fn event_hint(&self) -> Option<&'static str> {
        self.mode.event_hint()
    }

    pub fn sample_path(&self) -> PathBuf {
        self.work_dir.join("sample.jsonl")
    }

    pub fn warmup_path(&self) -> PathBuf {
        self.work_dir.join("warmup.jsonl")
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.batch_size == 0 {
            return Err(HarnessError::Config("batch size must be at least 1".into()));
        }
        if self.iterations == 0 {
            return Err(HarnessError::Config("iteration count must be at least 1".into()));
        }
        if self.backends.is_empty() {
            return Err(HarnessError::Config("no backends selected".into()));
        }
        for (i, kind) in self.backends.iter().enumerate() {
            if self.backends[..i].contains(kind) {
                return Err(HarnessError::Config(format!("backend '{kind}' listed twice")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = HarnessConfig::default();
        config.validate().unwrap();
        assert_eq!(config.schema_path(), PathBuf::from("schemas/erc20.json"));
        assert_eq!(config.event_hint(), Some("Transfer"));
        assert_eq!(config.backends.len(), 3);
    }

    #[test]
    fn multi_mode_has_no_hint() {
        let config = HarnessConfig {
            mode: BenchMode::Multi,
            ..HarnessConfig::default()
        };
        assert_eq!(config.schema_path(), PathBuf::from("schemas/multi.json"));
        assert_eq!(config.event_hint(), None);
    }

    #[test]
    fn rejects_zero_sizes_and_duplicate_backends() {
        let zero = HarnessConfig {
            iterations: 0,
            ..HarnessConfig::default()
        };
        assert!(matches!(zero.validate(), Err(HarnessError::Config(_))));

        let dup = HarnessConfig {
            backends: vec![BackendKind::Linked, BackendKind::Linked],
            ..HarnessConfig::default()
        };
        assert!(matches!(dup.validate(), Err(HarnessError::Config(_))));
    }

    #[test]
    fn backend_names_round_trip_through_clap() {
        for kind in BackendKind::ALL {
            assert_eq!(BackendKind::from_str(kind.as_str(), false).unwrap(), kind);
        }
    }
}
