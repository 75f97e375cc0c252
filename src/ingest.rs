/// Log ingestion: read a server log line by line and fold it into a report.
use crate::aggregator::SessionAggregator;
use crate::domain::Report;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Read the log at `path` (or stdin for `-`) and build its report.
pub fn ingest_path(path: &Path, prefix: &str) -> Result<Report, IngestError> {
    if path == Path::new(STDIN_PATH) {
        info!("reading log from stdin");
        let stdin = std::io::stdin();
        return ingest_reader(stdin.lock(), prefix);
    }

    info!(path = %path.display(), "opening log file");
    let file = std::fs::File::open(path).map_err(|e| IngestError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    ingest_reader(std::io::BufReader::new(file), prefix)
}

/// Fold every line of `reader` into a report.
///
/// Lines are consumed in order, once. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD and the line is folded like any other. A read
/// failure aborts the pass; nothing partial is returned.
pub fn ingest_reader<R: BufRead>(mut reader: R, prefix: &str) -> Result<Report, IngestError> {
    info!("scanning log");
    let mut aggregator = SessionAggregator::new(prefix);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| IngestError::Read {
                line: aggregator.lines_seen() + 1,
                source: e,
            })?;
        if read == 0 {
            break;
        }
        aggregator.feed(&String::from_utf8_lossy(strip_newline(&buf)));
    }

    let lines = aggregator.lines_seen();
    let report = aggregator.finish();
    info!(
        lines,
        games = report.games.len(),
        total_kills = report.total_kills(),
        "scan complete"
    );
    Ok(report)
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[derive(Debug)]
pub enum IngestError {
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    Read {
        line: u64,
        source: std::io::Error,
    },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Open { path, source } => {
                write!(f, "cannot open log {}: {source}", path.display())
            }
            IngestError::Read { line, source } => {
                write!(f, "I/O error reading log at line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Open { source, .. } => Some(source),
            IngestError::Read { source, .. } => Some(source),
        }
    }
}
