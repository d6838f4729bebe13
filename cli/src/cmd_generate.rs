//! `logbench generate`: write a synthetic corpus.

use anyhow::{Context, Result};
use clap::Args;
use logbench_harness::synth::{self, SynthMix};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of logs
    #[arg(long, default_value_t = 100_000)]
    count: usize,

    /// RNG seed; equal seeds give identical corpora
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// single: ERC-20 Transfer only; multi: Transfer/Approval/Swap plus unknown events
    #[arg(long, value_enum, default_value_t = SynthMix::Single)]
    mix: SynthMix,

    /// Output file (replaced)
    #[arg(long, env = "LOGBENCH_INPUT", default_value = "data/logs.jsonl")]
    out: PathBuf,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let logs = synth::generate(args.count, args.seed, args.mix);
    synth::write_corpus(&args.out, &logs)
        .with_context(|| format!("write corpus to {}", args.out.display()))?;

    let unknown = logs.iter().filter(|l| !l.known).count();
    println!(
        "Wrote {} logs ({} without a schema) to {}",
        logs.len(),
        unknown,
        args.out.display()
    );
    Ok(())
}
