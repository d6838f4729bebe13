//! `logbench run`: the benchmark harness.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use logbench_harness::{BackendKind, BenchMode, Harness, HarnessConfig, ResultSink};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// single: erc20.json decoded as Transfer; multi: multi.json routed on topic0
    #[arg(long, env = "LOGBENCH_MODE", value_enum, default_value_t = BenchMode::Single)]
    mode: BenchMode,

    /// Logs taken from the front of the corpus
    #[arg(long, env = "LOGBENCH_BATCH", default_value_t = 100_000)]
    batch: usize,

    /// Timed passes per backend
    #[arg(long, env = "LOGBENCH_ITERATIONS", default_value_t = 5)]
    iterations: usize,

    /// Corpus file (JSONL)
    #[arg(long, env = "LOGBENCH_INPUT", default_value = "data/logs.jsonl")]
    input: PathBuf,

    /// Directory holding erc20.json and multi.json
    #[arg(long, env = "LOGBENCH_SCHEMA_DIR", default_value = "schemas")]
    schema_dir: PathBuf,

    /// Result sink (JSONL, append-only)
    #[arg(long, env = "LOGBENCH_RESULTS", default_value = "results/bench.jsonl")]
    results: PathBuf,

    /// logbench-decode executable (default: next to this binary)
    #[arg(long, env = "LOGBENCH_DECODER_BIN")]
    decoder_bin: Option<PathBuf>,

    /// Backends to run, in order (default: all)
    #[arg(long, env = "LOGBENCH_BACKENDS", value_enum, value_delimiter = ',')]
    backends: Vec<BackendKind>,

    /// Where the sample and warmup artifacts are written
    #[arg(long, env = "LOGBENCH_WORK_DIR", default_value = "target/logbench")]
    work_dir: PathBuf,

    /// Print the summary without appending it to the sink
    #[arg(long)]
    no_sink: bool,
}

fn sibling_decoder() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locate current executable")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))?;
    Ok(dir.join(format!("logbench-decode{}", std::env::consts::EXE_SUFFIX)))
}

impl RunArgs {
    fn into_config(self) -> Result<HarnessConfig> {
        let decoder_bin = match self.decoder_bin {
            Some(path) => path,
            None => sibling_decoder()?,
        };
        let backends = if self.backends.is_empty() {
            BackendKind::ALL.to_vec()
        } else {
            self.backends
        };
        Ok(HarnessConfig {
            mode: self.mode,
            batch_size: self.batch,
            iterations: self.iterations,
            input: self.input,
            schema_dir: self.schema_dir,
            results: self.results,
            work_dir: self.work_dir,
            decoder_bin,
            backends,
            ..HarnessConfig::default()
        })
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let no_sink = args.no_sink;
    let config = args.into_config()?;

    let summary = Harness::from_config(&config)
        .run()
        .context("benchmark run failed")?;

    println!(
        "mode={} batch={} iterations={} warmup={}",
        summary.mode, summary.batch_size, summary.iterations, summary.warmup_size
    );
    for line in summary.human_lines() {
        println!("{line}");
    }

    if no_sink {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let sink = ResultSink::new(&config.results);
        sink.append(&summary)
            .with_context(|| format!("append summary to {}", sink.path().display()))?;
        info!("summary appended to {}", sink.path().display());
    }
    Ok(())
}
