//! Line-oriented corpus access.
//!
//! A corpus is newline-delimited JSON, one `{"topics":[...],"data":"0x.."}`
//! object per line. Blank lines are ignored everywhere.

use crate::error::CorpusError;
use crate::event::RawLog;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn open(path: &Path) -> Result<BufReader<File>, CorpusError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read up to `limit` non-empty lines verbatim (`None` = all lines).
pub fn read_lines(path: &Path, limit: Option<usize>) -> Result<Vec<String>, CorpusError> {
    read_lines_from(open(path)?, path, limit)
}

/// Like [`read_lines`] over any reader; `path` only labels errors.
pub fn read_lines_from<R: BufRead>(
    reader: R,
    path: &Path,
    limit: Option<usize>,
) -> Result<Vec<String>, CorpusError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        if limit.is_some_and(|n| lines.len() >= n) {
            break;
        }
        let line = line.map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Parse one corpus line. `line_no` is 1-based and only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<RawLog, CorpusError> {
    serde_json::from_str(line).map_err(|e| CorpusError::InvalidLine {
        line: line_no,
        reason: e.to_string(),
    })
}

/// Load and parse an entire corpus file.
pub fn load(path: &Path) -> Result<Vec<RawLog>, CorpusError> {
    load_from(open(path)?, path)
}

/// Load and parse a corpus from any reader, e.g. stdin.
pub fn load_from<R: BufRead>(reader: R, path: &Path) -> Result<Vec<RawLog>, CorpusError> {
    let mut logs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        logs.push(parse_line(&line, i + 1)?);
    }
    Ok(logs)
}
