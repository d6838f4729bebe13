//! `Harness`: sample, warm up, time, summarize.

use chrono::Utc;
use indexmap::IndexMap;
use logbench_core::schema::EventSchemaTable;
use std::time::Instant;
use tracing::{debug, info};

use crate::backend::{self, BackendJob, DecoderBackend};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::sample;
use crate::summary::{BackendSummary, BenchmarkRun, BenchmarkSummary};

/// Drives a set of backends over one corpus sample.
pub struct Harness {
    config: HarnessConfig,
    backends: Vec<Box<dyn DecoderBackend>>,
}

impl Harness {
    /// Build the backends named in `config.backends`, in that order.
    pub fn from_config(config: &HarnessConfig) -> Self {
        let backends = config
            .backends
            .iter()
            .map(|kind| backend::build(*kind, config))
            .collect();
        Self::new(config.clone(), backends)
    }

    /// Use caller-provided backends; `config.backends` is ignored.
    pub fn new(config: HarnessConfig, backends: Vec<Box<dyn DecoderBackend>>) -> Self {
        Self { config, backends }
    }

    /// Execute one full benchmark run.
    ///
    /// Any backend failure or disagreement aborts the run; no partial summary
    /// is returned.
    pub fn run(&self) -> Result<BenchmarkSummary, HarnessError> {
        self.config.validate()?;
        self.check_backend_names()?;

        // Schema problems surface here, before any artifact is written.
        let schema_path = self.config.schema_path();
        let table = EventSchemaTable::from_path(&schema_path)?;
        let hint = self.config.event_hint();
        if let Some(name) = hint {
            table.require(name)?;
        }

        let sample = sample::materialize(&self.config.input, &self.config.sample_path(), self.config.batch_size)?;
        if sample.lines == 0 {
            return Err(HarnessError::Config(format!(
                "corpus {} contains no logs",
                self.config.input.display()
            )));
        }
        let warmup_size = sample.lines.min(self.config.warmup_cap.max(1));
        let warmup = sample::materialize(&sample.path, &self.config.warmup_path(), warmup_size)?;

        info!(
            "harness: mode={} batch={} iterations={} warmup={} backends={}",
            self.config.mode,
            sample.lines,
            self.config.iterations,
            warmup.lines,
            self.backends.len()
        );

        let warmup_job = BackendJob::new(&schema_path, hint, &warmup.path);
        for backend in &self.backends {
            let run = self.invoke(backend.as_ref(), &warmup_job)?;
            debug!("harness: warmup {} done in {:.3} ms", run.backend, run.wall_ms);
        }

        let job = BackendJob::new(&schema_path, hint, &sample.path);
        let mut runs: IndexMap<String, Vec<BenchmarkRun>> = self
            .backends
            .iter()
            .map(|b| (b.name().to_string(), Vec::with_capacity(self.config.iterations)))
            .collect();

        for iteration in 1..=self.config.iterations {
            let pass = self
                .backends
                .iter()
                .map(|backend| self.invoke(backend.as_ref(), &job))
                .collect::<Result<Vec<_>, _>>()?;
            check_agreement(iteration, &pass)?;

            info!(
                "harness: iteration {}/{} decoded={} skipped={}",
                iteration,
                self.config.iterations,
                pass[0].tally.decoded,
                pass[0].tally.skipped()
            );
            for run in pass {
                runs.entry(run.backend.clone()).or_default().push(run);
            }
        }

        let backends = runs
            .into_iter()
            .filter_map(|(name, runs)| BackendSummary::from_runs(&runs, sample.lines).map(|s| (name, s)))
            .collect();

        Ok(BenchmarkSummary {
            mode: self.config.mode,
            batch_size: sample.lines,
            iterations: self.config.iterations,
            warmup_size: warmup.lines,
            backends,
            timestamp: Utc::now(),
        })
    }

    fn invoke(&self, backend: &dyn DecoderBackend, job: &BackendJob) -> Result<BenchmarkRun, HarnessError> {
        let name = backend.name().to_string();
        debug!("harness: running {} on {}", name, job.input_path.display());

        let start = Instant::now();
        let report = backend.run(job).map_err(|source| HarnessError::Backend {
            backend: name.clone(),
            source,
        })?;
        let wall_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "harness: {} decoded={} elapsed={:.3} ms wall={:.3} ms",
            name, report.tally.decoded, report.elapsed_ms, wall_ms
        );
        Ok(BenchmarkRun {
            backend: name,
            elapsed_ms: report.elapsed_ms,
            wall_ms,
            tally: report.tally,
        })
    }

    fn check_backend_names(&self) -> Result<(), HarnessError> {
        if self.backends.is_empty() {
            return Err(HarnessError::Config("no backends selected".into()));
        }
        for (i, backend) in self.backends.iter().enumerate() {
            if self.backends[..i].iter().any(|b| b.name() == backend.name()) {
                return Err(HarnessError::Config(format!(
                    "backend '{}' listed twice",
                    backend.name()
                )));
            }
        }
        Ok(())
    }
}

/// All backends in one iteration must report the same tally.
fn check_agreement(iteration: usize, pass: &[BenchmarkRun]) -> Result<(), HarnessError> {
    let Some(first) = pass.first() else {
        return Ok(());
    };
    if pass.iter().all(|r| r.tally == first.tally) {
        return Ok(());
    }

    let details = pass
        .iter()
        .map(|r| {
            format!(
                "{}: decoded={} no_match={} malformed={}",
                r.backend, r.tally.decoded, r.tally.no_match, r.tally.malformed
            )
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(HarnessError::Divergence { iteration, details })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BenchMode, WARMUP_CAP};
    use crate::error::BackendError;
    use crate::synth::{self, SynthMix};
    use logbench_core::{corpus, decoder::DecodeReport, event::DecodeTally};
    use std::path::Path;

    /// Counts lines and reports a scripted elapsed time.
    struct ScriptedBackend {
        name: &'static str,
        elapsed_ms: f64,
        extra_decoded: u64,
    }

    fn scripted(name: &'static str, elapsed_ms: f64) -> Box<dyn DecoderBackend> {
        Box::new(ScriptedBackend {
            name,
            elapsed_ms,
            extra_decoded: 0,
        })
    }

    impl DecoderBackend for ScriptedBackend {
        fn name(&self) -> &str {
            self.name
        }

        fn run(&self, job: &BackendJob) -> Result<DecodeReport, BackendError> {
            let lines = corpus::load(&job.input_path)?.len() as u64;
            Ok(DecodeReport {
                tally: DecodeTally {
                    decoded: lines + self.extra_decoded,
                    no_match: 0,
                    malformed: 0,
                },
                elapsed_ms: self.elapsed_ms,
            })
        }
    }

    fn config(dir: &Path, corpus_lines: usize, batch_size: usize) -> HarnessConfig {
        let input = dir.join("logs.jsonl");
        synth::write_corpus(&input, &synth::generate(corpus_lines, 11, SynthMix::Single)).unwrap();
        HarnessConfig {
            mode: BenchMode::Single,
            batch_size,
            iterations: 3,
            input,
            schema_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../schemas"),
            results: dir.join("bench.jsonl"),
            work_dir: dir.join("work"),
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn warms_up_then_times_every_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 50, 40);
        let harness = Harness::new(
            config.clone(),
            vec![
                scripted("fast", 2.0),
                scripted("slow", 8.0),
            ],
        );

        let summary = harness.run().unwrap();
        assert_eq!(summary.batch_size, 40);
        assert_eq!(summary.iterations, 3);
        assert_eq!(summary.warmup_size, 40.min(WARMUP_CAP));
        assert_eq!(summary.backends.keys().collect::<Vec<_>>(), ["fast", "slow"]);

        let fast = &summary.backends["fast"];
        assert_eq!(fast.per_run_ms.len(), 3);
        assert_eq!(fast.logs_per_second, 20_000);
        assert_eq!(fast.decoded, 40);
        assert_eq!(summary.backends["slow"].logs_per_second, 5_000);
    }

    #[test]
    fn short_corpus_sets_effective_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 7, 1_000);
        let harness = Harness::new(config, vec![scripted("only", 1.0)]);
        let summary = harness.run().unwrap();
        assert_eq!(summary.batch_size, 7);
        assert_eq!(summary.backends["only"].decoded, 7);
    }

    #[test]
    fn warmup_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), 30, 30);
        config.warmup_cap = 5;
        config.iterations = 1;

        let harness = Harness::new(config.clone(), vec![scripted("only", 1.0)]);
        let summary = harness.run().unwrap();
        assert_eq!(summary.warmup_size, 5);
        assert_eq!(corpus::read_lines(&config.warmup_path(), None).unwrap().len(), 5);
        assert_eq!(corpus::read_lines(&config.sample_path(), None).unwrap().len(), 30);
    }

    #[test]
    fn disagreeing_backends_abort_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 20, 20);
        let liar: Box<dyn DecoderBackend> = Box::new(ScriptedBackend {
            name: "liar",
            elapsed_ms: 1.0,
            extra_decoded: 1,
        });
        let harness = Harness::new(config, vec![scripted("honest", 1.0), liar]);

        match harness.run() {
            Err(HarnessError::Divergence { iteration, details }) => {
                assert_eq!(iteration, 1);
                assert!(details.contains("liar: decoded=21"), "{details}");
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn unknown_schema_dir_fails_before_sampling() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), 5, 5);
        config.schema_dir = dir.path().join("missing");

        let harness = Harness::new(config.clone(), vec![scripted("only", 1.0)]);
        assert!(matches!(harness.run(), Err(HarnessError::Schema(_))));
        assert!(!config.sample_path().exists());
    }

    #[test]
    fn duplicate_backend_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 5, 5);
        let harness = Harness::new(
            config,
            vec![
                scripted("same", 1.0),
                scripted("same", 1.0),
            ],
        );
        assert!(matches!(harness.run(), Err(HarnessError::Config(_))));
    }
}
