//! Sample artifacts.
//!
//! The sample is the first `n` non-empty corpus lines, copied verbatim into a
//! fresh file. Every backend and every iteration reads that file, so all of
//! them see identical bytes. Sampling is deterministic: the same corpus and
//! `n` always give a byte-identical artifact.

use logbench_core::corpus;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::HarnessError;

/// A materialized sample file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleArtifact {
    pub path: PathBuf,
    /// Lines actually written; less than requested for a short corpus
    pub lines: usize,
}

/// Copy the first `limit` non-empty lines of `source` into `dest`,
/// replacing any previous file.
pub fn materialize(source: &Path, dest: &Path, limit: usize) -> Result<SampleArtifact, HarnessError> {
    let lines = corpus::read_lines(source, Some(limit))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| HarnessError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let io_err = |source| HarnessError::Io {
        path: dest.to_path_buf(),
        source,
    };
    let mut out = std::io::BufWriter::new(fs::File::create(dest).map_err(io_err)?);
    for line in &lines {
        out.write_all(line.as_bytes()).map_err(io_err)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    debug!("sample: wrote {} lines to {}", lines.len(), dest.display());
    Ok(SampleArtifact {
        path: dest.to_path_buf(),
        lines: lines.len(),
    })
}
