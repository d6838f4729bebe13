//! `logbench sample`: materialize the sample artifact without timing anything.

use anyhow::{Context, Result};
use clap::Args;
use logbench_harness::sample;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Corpus file (JSONL)
    #[arg(long, env = "LOGBENCH_INPUT", default_value = "data/logs.jsonl")]
    input: PathBuf,

    /// Logs taken from the front of the corpus
    #[arg(long, env = "LOGBENCH_BATCH", default_value_t = 100_000)]
    batch: usize,

    /// Sample file (replaced)
    #[arg(long, default_value = "target/logbench/sample.jsonl")]
    out: PathBuf,
}

pub fn run(args: SampleArgs) -> Result<()> {
    let artifact = sample::materialize(&args.input, &args.out, args.batch)
        .with_context(|| format!("sample {}", args.input.display()))?;

    if artifact.lines < args.batch {
        println!(
            "Corpus has only {} logs; sample is shorter than the requested {}",
            artifact.lines, args.batch
        );
    }
    println!("Wrote {} logs to {}", artifact.lines, artifact.path.display());
    Ok(())
}
