//! `logbench-decode`: the out-of-process decoder.
//!
//! Reads a JSONL file of logs (or stdin), decodes each one against the ABI and
//! prints one aggregate line on stderr:
//!
//! ```text
//! decoded=<n> elapsed_ms=<t> no_match=<a> malformed=<b> throughput_lps=<x>
//! ```
//!
//! Exit status 0 means the line is valid. Schema and input errors exit
//! nonzero with the reason on stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use logbench_core::{
    corpus,
    decoder::{DecodeReport, LogDecoder},
    event::{DecodeOutcome, DecodeTally},
    schema::EventSchemaTable,
};
use logbench_evm::{decode_file_with, DynAbiDecoder, StrideDecoder};
use logbench_harness::backend::subprocess::format_report_line;
use logbench_observability::{init_tracing, LogConfig};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DecoderChoice {
    /// Native fixed-stride word decoder
    Stride,
    /// alloy dyn-abi
    #[value(name = "dyn-abi")]
    DynAbi,
}

#[derive(Parser, Debug)]
#[command(name = "logbench-decode", version, about = "Decode a JSONL file of EVM logs and report throughput")]
struct Args {
    /// ABI JSON file (array, or object with `abi` / `events`)
    #[arg(long)]
    abi: PathBuf,

    /// Decode every log as this event. Omit to route on topics[0].
    #[arg(long)]
    event: Option<String>,

    /// JSONL input with {"topics":[...],"data":"0x..."}; default stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print each decoded event as JSON on stdout
    #[arg(long)]
    print: bool,

    #[arg(long, value_enum, default_value_t = DecoderChoice::Stride)]
    decoder: DecoderChoice,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    // stderr carries the protocol line; keep it quiet unless RUST_LOG asks.
    init_tracing(&LogConfig {
        level: "warn".into(),
        json: args.json_logs,
        ..LogConfig::default()
    });

    let decoder: Box<dyn LogDecoder> = match args.decoder {
        DecoderChoice::Stride => Box::new(StrideDecoder::new()),
        DecoderChoice::DynAbi => Box::new(DynAbiDecoder::new()),
    };
    let event = args.event.as_deref().unwrap_or("");

    let report = match (&args.input, args.print) {
        (Some(input), false) => decode_file_with(decoder.as_ref(), &args.abi, event, input)
            .with_context(|| format!("decode {}", input.display()))?,
        _ => decode_streaming(decoder.as_ref(), &args, event)?,
    };

    eprintln!("{}", format_report_line(&report));
    Ok(())
}

/// Decode from stdin and/or with per-event output. Printing is timed.
fn decode_streaming(decoder: &dyn LogDecoder, args: &Args, event: &str) -> Result<DecodeReport> {
    let table = EventSchemaTable::from_path(&args.abi)
        .with_context(|| format!("load ABI {}", args.abi.display()))?;
    let hint = (!event.is_empty()).then_some(event);
    if let Some(name) = hint {
        table.require(name)?;
    }

    let logs = match &args.input {
        Some(path) => corpus::load(path)?,
        None => corpus::load_from(io::stdin().lock(), Path::new("<stdin>"))?,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let start = Instant::now();
    let mut tally = DecodeTally::default();
    for log in &logs {
        let outcome = decoder.decode(log, &table, hint);
        tally.record(&outcome);
        if let (true, DecodeOutcome::Decoded(decoded)) = (args.print, &outcome) {
            if let Some(entry) = table.get_by_name(&decoded.event_name) {
                writeln!(out, "{}", decoded.to_json(entry))?;
            }
        }
    }
    out.flush()?;
    let elapsed = start.elapsed();

    Ok(DecodeReport {
        tally,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    })
}
