//! Append-only JSONL result sink.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::HarnessError;
use crate::summary::BenchmarkSummary;

/// Appends one summary per line. Existing content is never rewritten.
#[derive(Debug, Clone)]
pub struct ResultSink {
    path: PathBuf,
}

impl ResultSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, summary: &BenchmarkSummary) -> Result<(), HarnessError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HarnessError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut line = serde_json::to_string(summary)?;
        line.push('\n');

        let io_err = |source| HarnessError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        if !ends_with_newline(&mut file).map_err(io_err)? {
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes()).map_err(io_err)?;

        info!("sink: appended summary to {}", self.path.display());
        Ok(())
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
