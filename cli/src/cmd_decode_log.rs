//! `logbench decode-log`: decode a single log given on the command line.

use anyhow::{bail, Context, Result};
use clap::Args;
use logbench_core::{
    decoder::LogDecoder,
    event::{DecodeOutcome, RawLog},
    schema::EventSchemaTable,
};
use logbench_evm::StrideDecoder;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct DecodeLogArgs {
    /// ABI JSON file (array, or object with `abi` / `events`)
    #[arg(long)]
    abi: PathBuf,

    /// topics[0] = event signature hash, topics[1..] = indexed params
    #[arg(long, num_args = 1..)]
    topics: Vec<String>,

    /// Non-indexed params (hex, 0x-prefixed)
    #[arg(long, default_value = "0x")]
    data: String,

    /// Decode as this event regardless of topics[0]
    #[arg(long)]
    event: Option<String>,
}

pub fn run(args: DecodeLogArgs) -> Result<()> {
    let table = EventSchemaTable::from_path(&args.abi)
        .with_context(|| format!("load ABI {}", args.abi.display()))?;
    if let Some(name) = &args.event {
        table.require(name)?;
    }

    let log = RawLog {
        topics: args.topics,
        data: args.data,
    };

    match StrideDecoder::new().decode(&log, &table, args.event.as_deref()) {
        DecodeOutcome::Decoded(event) => {
            let entry = table
                .get_by_name(&event.event_name)
                .context("decoded event missing from its own table")?;
            println!("{}", serde_json::to_string_pretty(&event.to_json(entry))?);
            Ok(())
        }
        DecodeOutcome::NoMatchingSchema => bail!(
            "no event in {} matches topic0 {}",
            args.abi.display(),
            log.topic0().unwrap_or("<none>")
        ),
        DecodeOutcome::Malformed(reason) => bail!("malformed log: {reason}"),
    }
}
