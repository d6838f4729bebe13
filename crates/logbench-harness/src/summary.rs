//! Run records and the per-run summary written to the result sink.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use logbench_core::event::DecodeTally;
use serde::{Deserialize, Serialize};

use crate::config::BenchMode;

/// One timed pass of one backend over the sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub backend: String,
    /// Self-measured by the backend
    pub elapsed_ms: f64,
    /// Measured by the harness around the whole call
    pub wall_ms: f64,
    pub tally: DecodeTally,
}

/// Aggregated figures for one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSummary {
    pub average_ms: f64,
    pub average_wall_ms: f64,
    /// `round(batch / (average_ms / 1000))`, 0 when the average is 0
    pub logs_per_second: u64,
    pub per_run_ms: Vec<f64>,
    pub per_run_wall_ms: Vec<f64>,
    pub decoded: u64,
    pub skipped_no_match: u64,
    pub skipped_malformed: u64,
}

impl BackendSummary {
    /// Summarize the timed runs of one backend. Returns `None` for no runs.
    pub fn from_runs(runs: &[BenchmarkRun], batch_size: usize) -> Option<Self> {
        let last = runs.last()?;
        let per_run_ms: Vec<f64> = runs.iter().map(|r| r.elapsed_ms).collect();
        let per_run_wall_ms: Vec<f64> = runs.iter().map(|r| r.wall_ms).collect();
        let average_ms = mean(&per_run_ms);

        Some(Self {
            average_ms,
            average_wall_ms: mean(&per_run_wall_ms),
            logs_per_second: logs_per_second(batch_size, average_ms),
            per_run_ms,
            per_run_wall_ms,
            decoded: last.tally.decoded,
            skipped_no_match: last.tally.no_match,
            skipped_malformed: last.tally.malformed,
        })
    }
}

/// One harness invocation, as appended to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub mode: BenchMode,
    /// Effective batch: lines actually in the sample
    pub batch_size: usize,
    pub iterations: usize,
    pub warmup_size: usize,
    /// Keyed by backend name, in run order
    pub backends: IndexMap<String, BackendSummary>,
    pub timestamp: DateTime<Utc>,
}

impl BenchmarkSummary {
    /// One condensed line per backend, for the terminal.
    pub fn human_lines(&self) -> Vec<String> {
        self.backends
            .iter()
            .map(|(name, s)| {
                format!(
                    "[{}] {:<10} avg {:>10.3} ms  wall {:>10.3} ms  {:>12} logs/s  decoded={} skipped={}",
                    self.mode,
                    name,
                    s.average_ms,
                    s.average_wall_ms,
                    s.logs_per_second,
                    s.decoded,
                    s.skipped_no_match + s.skipped_malformed,
                )
            })
            .collect()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Logs per second for a batch decoded in `average_ms` on average.
pub fn logs_per_second(batch_size: usize, average_ms: f64) -> u64 {
    if average_ms <= 0.0 {
        return 0;
    }
    (batch_size as f64 / (average_ms / 1000.0)).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(elapsed_ms: f64, wall_ms: f64) -> BenchmarkRun {
        BenchmarkRun {
            backend: "linked".into(),
            elapsed_ms,
            wall_ms,
            tally: DecodeTally {
                decoded: 950,
                no_match: 50,
                malformed: 0,
            },
        }
    }

    #[test]
    fn lps_from_average() {
        assert_eq!(logs_per_second(100_000, 50.0), 2_000_000);
        assert_eq!(logs_per_second(3, 7.0), 429);
        assert_eq!(logs_per_second(1_000, 0.0), 0);
    }

    #[test]
    fn backend_summary_averages_both_clocks() {
        let runs = [run(10.0, 12.0), run(20.0, 24.0), run(30.0, 36.0)];
        let s = BackendSummary::from_runs(&runs, 1_000).unwrap();
        assert!((s.average_ms - 20.0).abs() < 1e-9);
        assert!((s.average_wall_ms - 24.0).abs() < 1e-9);
        assert_eq!(s.logs_per_second, 50_000);
        assert_eq!(s.per_run_ms, vec![10.0, 20.0, 30.0]);
        assert_eq!(s.decoded, 950);
        assert_eq!(s.skipped_no_match, 50);
    }

    #[test]
    fn no_runs_no_summary() {
        assert!(BackendSummary::from_runs(&[], 10).is_none());
    }

    #[test]
    fn serializes_with_backend_order_preserved() {
        let mut backends = IndexMap::new();
        for name in ["subprocess", "dyn-abi", "linked"] {
            backends.insert(name.to_string(), BackendSummary::from_runs(&[run(1.0, 1.5)], 1_000).unwrap());
        }
        let summary = BenchmarkSummary {
            mode: BenchMode::Multi,
            batch_size: 1_000,
            iterations: 1,
            warmup_size: 1_000,
            backends,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"mode\":\"multi\""));
        let sub = json.find("subprocess").unwrap();
        let dyn_abi = json.find("dyn-abi").unwrap();
        assert!(sub < dyn_abi);

        let lines = summary.human_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("subprocess"));
        assert!(lines[0].contains("1000000 logs/s"));
    }
}
