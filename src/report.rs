//! Text and JSON renderings of a grouping.

use crate::operations::SizeReport;
use crate::plugin::{Grouping, Plugin, PluginFormat};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// `Name [TAG TAG]` per plugin, sorted by name ignoring case.
pub fn write_by_name<W: Write>(grouping: &Grouping, out: &mut W) -> Result<()> {
    for plugin in grouping.sorted() {
        let tags: Vec<&str> = plugin.formats().iter().map(PluginFormat::tag).collect();
        writeln!(out, "{} [{}]", plugin.name, tags.join(" "))?;
    }
    Ok(())
}

/// One install path per line.
pub fn write_paths<W: Write>(grouping: &Grouping, out: &mut W) -> Result<()> {
    for path in grouping.all_paths() {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

/// Paths with their size in MB, largest first. Unmeasurable paths are reported first.
pub fn write_sizes<W: Write>(report: &SizeReport, out: &mut W) -> Result<()> {
    for (path, error) in &report.errors {
        writeln!(out, "Error getting size for {}: {:#}", path.display(), error)?;
    }
    for entry in &report.entries {
        writeln!(out, "{} {:.2}MB", entry.path.display(), entry.megabytes())?;
    }
    Ok(())
}

/// Total number of install paths.
pub fn write_count<W: Write>(grouping: &Grouping, out: &mut W) -> Result<()> {
    writeln!(out, "{}", grouping.path_count())?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct PluginSummary<'a> {
    name: &'a str,
    paths: &'a [PathBuf],
    formats: Vec<PluginFormat>,
}

impl<'a> From<&'a Plugin> for PluginSummary<'a> {
    fn from(plugin: &'a Plugin) -> Self {
        Self {
            name: &plugin.name,
            paths: &plugin.paths,
            formats: plugin.formats(),
        }
    }
}

/// Pretty-printed JSON array of `{ name, paths, formats }`, sorted like [`write_by_name`].
pub fn write_json<W: Write>(grouping: &Grouping, out: &mut W) -> Result<()> {
    let summaries: Vec<PluginSummary> = grouping.sorted().into_iter().map(Into::into).collect();
    serde_json::to_writer_pretty(&mut *out, &summaries)?;
    writeln!(out)?;
    Ok(())
}
