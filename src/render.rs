/// Report rendering: two banner-headed JSON documents, one for the match
/// payloads and one for the kill-by-means tallies.
///
/// File output uses an atomic write (temp file in the target directory,
/// then persist) so readers never see a partial report.
use crate::domain::Report;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const REPORT_BANNER: &str = "------------ Report ------------";
pub const KILL_BY_MEANS_BANNER: &str = "------------ Report KillByMeans ------------";

const INDENT: &[u8] = b" ";

/// Write the rendered report to `out`.
pub fn render<W: Write>(report: &Report, mut out: W) -> Result<(), RenderError> {
    writeln!(out, "{REPORT_BANNER}").map_err(RenderError::Io)?;
    write_json(&mut out, &report.games)?;
    writeln!(out, "{KILL_BY_MEANS_BANNER}").map_err(RenderError::Io)?;
    write_json(&mut out, &report.kills_by_means)?;
    out.flush().map_err(RenderError::Io)
}

/// Atomically write the rendered report to `path`.
pub fn write_report(report: &Report, path: &Path) -> Result<(), RenderError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| RenderError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;
    render(report, &mut tmp)?;

    tmp.persist(path).map_err(|e| RenderError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), RenderError> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
    value.serialize(&mut ser).map_err(RenderError::Serialize)?;
    writeln!(out).map_err(RenderError::Io)
}

#[derive(Debug)]
pub enum RenderError {
    Serialize(serde_json::Error),
    Io(std::io::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Serialize(e) => write!(f, "failed to serialize report: {e}"),
            RenderError::Io(e) => write!(f, "failed to write report: {e}"),
            RenderError::Write { path, source } => {
                write!(f, "failed to write report to {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Serialize(e) => Some(e),
            RenderError::Io(e) => Some(e),
            RenderError::Write { source, .. } => Some(source),
        }
    }
}
