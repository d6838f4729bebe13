//! Out-of-process backend.
//!
//! Request: command-line arguments `--abi <schema> [--event <name>] --input <path>`.
//! Response: the last stderr line of the form
//! `decoded=<n> elapsed_ms=<t> [no_match=<a>] [malformed=<b>] ...`.
//! Error channel: exit status plus captured stderr.
//!
//! The harness blocks until the child exits. There is no timeout: a hung
//! decoder hangs the run, so keep batch sizes bounded.

use logbench_core::{decoder::DecodeReport, event::DecodeTally};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use tracing::debug;

use super::{BackendJob, DecoderBackend};
use crate::error::BackendError;

/// Render the aggregate line a decoder process prints on stderr.
pub fn format_report_line(report: &DecodeReport) -> String {
    let secs = report.elapsed_ms / 1000.0;
    let lps = if secs > 0.0 {
        (report.tally.decoded as f64 / secs).round()
    } else {
        0.0
    };
    format!(
        "decoded={} elapsed_ms={:.3} no_match={} malformed={} throughput_lps={:.0}",
        report.tally.decoded, report.elapsed_ms, report.tally.no_match, report.tally.malformed, lps
    )
}

/// Parse an aggregate line. `decoded` and `elapsed_ms` are required; unknown
/// keys are ignored.
pub fn parse_report_line(line: &str) -> Option<DecodeReport> {
    let mut decoded = None;
    let mut elapsed_ms = None;
    let mut tally = DecodeTally::default();

    for pair in line.split_whitespace() {
        let (key, value) = pair.split_once('=')?;
        match key {
            "decoded" => decoded = Some(value.parse().ok()?),
            "elapsed_ms" => elapsed_ms = Some(value.parse().ok()?),
            "no_match" => tally.no_match = value.parse().ok()?,
            "malformed" => tally.malformed = value.parse().ok()?,
            _ => {}
        }
    }

    tally.decoded = decoded?;
    Some(DecodeReport {
        tally,
        elapsed_ms: elapsed_ms?,
    })
}

/// Lifecycle of one decoder process.
enum Invocation {
    NotStarted(Command),
    Spawned(Child),
    Completed(DecodeReport),
    Failed(BackendError),
}

impl Invocation {
    fn advance(self, program: &Path) -> Self {
        match self {
            Invocation::NotStarted(mut command) => match command.spawn() {
                Ok(child) => {
                    debug!("subprocess: spawned {} (pid {})", program.display(), child.id());
                    Invocation::Spawned(child)
                }
                Err(e) => Invocation::Failed(BackendError::Invocation {
                    program: program.to_path_buf(),
                    status: "failed to start".into(),
                    stderr: e.to_string(),
                }),
            },
            Invocation::Spawned(child) => match child.wait_with_output() {
                Ok(output) => finish(program, output),
                Err(e) => Invocation::Failed(BackendError::Invocation {
                    program: program.to_path_buf(),
                    status: "wait failed".into(),
                    stderr: e.to_string(),
                }),
            },
            done => done,
        }
    }
}

fn finish(program: &Path, output: Output) -> Invocation {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|c| format!("exit code {c}"))
            .unwrap_or_else(|| "terminated by signal".into());
        return Invocation::Failed(BackendError::Invocation {
            program: program.to_path_buf(),
            status,
            stderr,
        });
    }

    let report = stderr
        .lines()
        .rev()
        .filter(|l| l.trim_start().starts_with("decoded="))
        .find_map(parse_report_line);
    match report {
        Some(report) => Invocation::Completed(report),
        None => Invocation::Failed(BackendError::Protocol { stderr }),
    }
}

/// Drives the `logbench-decode` binary.
#[derive(Debug, Clone)]
pub struct SubprocessBackend {
    program: PathBuf,
}

impl SubprocessBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, job: &BackendJob) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("--abi").arg(&job.schema_path);
        if let Some(event) = &job.event {
            command.arg("--event").arg(event);
        }
        command
            .arg("--input")
            .arg(&job.input_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }
}

impl DecoderBackend for SubprocessBackend {
    fn name(&self) -> &str {
        "subprocess"
    }

    fn run(&self, job: &BackendJob) -> Result<DecodeReport, BackendError> {
        let mut invocation = Invocation::NotStarted(self.command(job));
        loop {
            invocation = match invocation.advance(&self.program) {
                Invocation::Completed(report) => return Ok(report),
                Invocation::Failed(err) => return Err(err),
                pending => pending,
            };
        }
    }
}
