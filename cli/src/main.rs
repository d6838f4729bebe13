//! logbench CLI.
//!
//! # Commands
//! ```text
//! logbench run         [--mode single|multi] [--batch N] [--iterations N] ...
//! logbench generate    --count N --seed S --mix single|multi --out <path>
//! logbench sample      --input <corpus> --batch N --out <path>
//! logbench decode-log  --abi <path.json> --topics <...> --data <hex> [--event <name>]
//! ```
//!
//! The subprocess backend is the sibling `logbench-decode` binary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use logbench_observability::{init_tracing, LogConfig};

mod cmd_decode_log;
mod cmd_generate;
mod cmd_run;
mod cmd_sample;

#[derive(Parser)]
#[command(
    name = "logbench",
    about = "Cross-backend EVM log decoding benchmark",
    long_about = "
logbench: decode the same sample of EVM logs with several backends and
compare their throughput. Results are appended to a JSONL sink.

ENVIRONMENT VARIABLES (run):
  LOGBENCH_MODE          single | multi
  LOGBENCH_BATCH         logs taken from the front of the corpus
  LOGBENCH_ITERATIONS    timed passes per backend
  LOGBENCH_INPUT         corpus path (JSONL)
  LOGBENCH_SCHEMA_DIR    directory with erc20.json and multi.json
  LOGBENCH_RESULTS       result sink path
  LOGBENCH_DECODER_BIN   logbench-decode executable
  LOGBENCH_BACKENDS      comma list: dyn-abi,linked,subprocess
  LOGBENCH_WORK_DIR      where sample artifacts are written
  RUST_LOG               log filter, overrides --verbose
",
    version
)]
struct Cli {
    /// Debug logging for the logbench crates
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark and append a summary to the result sink
    Run(cmd_run::RunArgs),

    /// Write a deterministic synthetic corpus
    Generate(cmd_generate::GenerateArgs),

    /// Materialize the sample artifact only
    Sample(cmd_sample::SampleArgs),

    /// Decode one log from raw topics + data
    #[command(name = "decode-log")]
    DecodeLog(cmd_decode_log::DecodeLogArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&LogConfig::from_verbosity(cli.verbose, cli.json_logs));

    match cli.command {
        Commands::Run(args) => cmd_run::run(args),
        Commands::Generate(args) => cmd_generate::run(args),
        Commands::Sample(args) => cmd_sample::run(args),
        Commands::DecodeLog(args) => cmd_decode_log::run(args),
    }
}
