//! Plugin management operations (size accounting and removal).
//!
//! - Size: total bytes under each install path, largest first
//! - Remove: confirm interactively, then move every path to the trash

use crate::config::{Config, PathSet};
use crate::platform::Platform;
use crate::plugin::Grouping;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Word the user must type to confirm a removal.
pub const CONFIRMATION_WORD: &str = "delete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedPath {
    pub path: PathBuf,
    pub size: u64,
}

impl SizedPath {
    pub fn megabytes(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// Sizes for every path of a grouping, plus the paths that could not be walked.
#[derive(Debug, Default)]
pub struct SizeReport {
    pub entries: Vec<SizedPath>,
    pub errors: Vec<(PathBuf, anyhow::Error)>,
}

/// Sum of the sizes of all non-directory entries at or below `path`.
/// Symlinks are counted as themselves, not followed.
pub fn path_size(path: &Path) -> Result<u64> {
    let mut size = 0;
    for entry in WalkDir::new(path).follow_root_links(false) {
        let entry = entry.context(format!("Failed to walk {:?}", path))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let metadata = entry
            .metadata()
            .context(format!("Failed to read metadata: {:?}", entry.path()))?;
        size += metadata.len();
    }
    Ok(size)
}

/// Measures every path in the grouping and sorts the results largest first.
/// A path that cannot be measured is recorded in `errors` and left out.
pub fn sized_paths(grouping: &Grouping) -> SizeReport {
    let mut report = SizeReport::default();

    for path in grouping.all_paths() {
        match path_size(path) {
            Ok(size) => report.entries.push(SizedPath {
                path: path.to_path_buf(),
                size,
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "failed to size path");
                report.errors.push((path.to_path_buf(), e));
            }
        }
    }

    report.entries.sort_by(|a, b| b.size.cmp(&a.size));
    report
}

/// Opens every configured root in the file browser. A root that fails to
/// open is reported to `out` and the rest are still opened.
pub fn open_roots<W: Write>(roots: &PathSet, platform: &dyn Platform, out: &mut W) -> Result<usize> {
    let mut opened = 0;
    for root in roots.iter() {
        match platform.open_in_browser(Path::new(root)) {
            Ok(()) => opened += 1,
            Err(e) => {
                warn!(path = %root, error = %format!("{e:#}"), "failed to open root");
                writeln!(out, "Error opening {root}: {e:#}")?;
            }
        }
    }
    Ok(opened)
}

/// Opens `paths.txt` with the platform's default handler.
pub fn open_paths_file(config: &Config, platform: &dyn Platform) -> Result<PathBuf> {
    let paths_file = config.paths_file();
    platform.open_in_browser(&paths_file)?;
    Ok(paths_file)
}

/// Outcome of a removal request.
#[derive(Debug, Default)]
pub struct RemovalSummary {
    pub aborted: bool,
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Lists every path, asks for confirmation, then trashes each path in turn.
///
/// Only the exact word `delete` confirms. A failed move is reported and the
/// remaining paths are still attempted.
pub fn remove_plugins<R: BufRead, W: Write>(
    grouping: &Grouping,
    platform: &dyn Platform,
    input: &mut R,
    out: &mut W,
) -> Result<RemovalSummary> {
    let paths = grouping.all_paths();
    for path in &paths {
        writeln!(out, "{}", path.display().to_string().red())?;
    }

    write!(
        out,
        "{}",
        format!(
            "Do you REALLY want to delete all of these paths? (type '{CONFIRMATION_WORD}' to confirm): "
        )
        .yellow()
    )?;
    out.flush()?;

    let mut summary = RemovalSummary::default();
    if read_token(input).as_deref() != Some(CONFIRMATION_WORD) {
        writeln!(out, "{}", "Aborted. Nothing deleted.".green())?;
        summary.aborted = true;
        return Ok(summary);
    }

    for path in paths {
        match platform.trash_move(path) {
            Ok(_) => {
                writeln!(out, "{} - {}", path.display(), "DELETED".red())?;
                summary.deleted.push(path.to_path_buf());
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!(path = %path.display(), error = %message, "failed to trash path");
                writeln!(out, "{} - {}", path.display(), message)?;
                summary.failed.push((path.to_path_buf(), message));
            }
        }
    }

    Ok(summary)
}

/// First whitespace-separated token of the input. End of input or an
/// unreadable stream yields `None`; bytes that are not UTF-8 are replaced.
fn read_token<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = Vec::new();
    loop {
        line.clear();
        match input.read_until(b'\n', &mut line) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "failed to read confirmation");
                return None;
            }
        }
        let text = String::from_utf8_lossy(&line);
        if let Some(token) = text.split_whitespace().next() {
            return Some(token.to_string());
        }
    }
}
