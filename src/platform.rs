//! Host-specific behaviour: default roots, trash moves, and opening folders.

use crate::error::PrmError;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub trait Platform {
    /// Human readable platform name used in messages.
    fn name(&self) -> &'static str;

    /// Roots written to a freshly created paths file.
    fn default_roots(&self) -> BTreeSet<String>;

    /// Moves `path` into the user's trash, returning where it ended up.
    fn trash_move(&self, path: &Path) -> Result<PathBuf>;

    /// Opens `path` in the platform file browser without waiting for it.
    fn open_in_browser(&self, path: &Path) -> Result<()>;
}

/// Returns the implementation for the operating system we were built for.
pub fn host() -> Box<dyn Platform> {
    #[cfg(target_os = "macos")]
    {
        Box::new(MacOs { home: dirs::home_dir() })
    }

    #[cfg(target_os = "linux")]
    {
        Box::new(Linux { home: dirs::home_dir() })
    }

    #[cfg(target_os = "windows")]
    {
        Box::new(Windows)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Box::new(Unsupported)
    }
}

fn roots(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|root| root.to_string()).collect()
}

/// Where a trashed bundle lands. An existing entry of the same name gets a
/// timestamp suffix instead of being replaced.
pub fn trash_destination(trash_dir: &Path, path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .context(format!("Invalid file name: {:?}", path))?;
    let dest = trash_dir.join(file_name);
    if !dest.exists() {
        return Ok(dest);
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Ok(trash_dir.join(format!("{} {}", file_name.to_string_lossy(), timestamp)))
}

/// Plugin folders are usually root-owned, so the move goes through `sudo mv`.
fn sudo_move(path: &Path, dest: &Path) -> Result<()> {
    debug!(from = %path.display(), to = %dest.display(), "moving to trash");
    let status = Command::new("sudo")
        .arg("mv")
        .arg(path)
        .arg(dest)
        .status()
        .context("Failed to run sudo mv")?;

    if !status.success() {
        return Err(PrmError::CommandFailed {
            command: "sudo mv".into(),
            path: path.to_path_buf(),
            status,
        }
        .into());
    }
    Ok(())
}

fn spawn_opener(program: &str, path: &Path) -> Result<()> {
    Command::new(program)
        .arg(path)
        .spawn()
        .context(format!("Failed to run {program} for {:?}", path))?;
    Ok(())
}

pub struct MacOs {
    pub home: Option<PathBuf>,
}

impl Platform for MacOs {
    fn name(&self) -> &'static str {
        "macOS"
    }

    fn default_roots(&self) -> BTreeSet<String> {
        roots(&[
            "/Library/Audio/Plug-Ins",
            "/Library/Application Support/Avid/Audio/Plug-Ins",
        ])
    }

    fn trash_move(&self, path: &Path) -> Result<PathBuf> {
        let home = self.home.as_ref().ok_or(PrmError::NoHomeDir)?;
        let dest = trash_destination(&home.join(".Trash"), path)?;
        sudo_move(path, &dest)?;
        Ok(dest)
    }

    fn open_in_browser(&self, path: &Path) -> Result<()> {
        spawn_opener("open", path)
    }
}

pub struct Linux {
    pub home: Option<PathBuf>,
}

impl Platform for Linux {
    fn name(&self) -> &'static str {
        "Linux"
    }

    fn default_roots(&self) -> BTreeSet<String> {
        roots(&[
            "~/.clap/",
            "/usr/lib/clap/",
            "/usr/local/lib/clap/",
            "~/.vst/",
            "/usr/lib/vst/",
            "/usr/local/lib/vst/",
            "~/.vst3/",
            "/usr/lib/vst3/",
            "/usr/local/lib/vst3/",
        ])
    }

    fn trash_move(&self, path: &Path) -> Result<PathBuf> {
        let home = self.home.as_ref().ok_or(PrmError::NoHomeDir)?;
        let trash_dir = home.join(".local").join("share").join("Trash").join("files");
        let dest = trash_destination(&trash_dir, path)?;
        sudo_move(path, &dest)?;
        Ok(dest)
    }

    fn open_in_browser(&self, path: &Path) -> Result<()> {
        spawn_opener("xdg-open", path)
    }
}

pub struct Windows;

impl Platform for Windows {
    fn name(&self) -> &'static str {
        "Windows"
    }

    fn default_roots(&self) -> BTreeSet<String> {
        roots(&[
            r"C:\Program Files\Common Files\Avid\Audio\Plug-Ins",
            r"C:\Program Files (x86)\Common Files\Avid\Audio\Plug-Ins",
            r"C:\Program Files\Vstplugins\",
            r"C:\Program Files\Steinberg\VSTPlugins\",
            r"C:\Program Files (x86)\Vstplugins\",
            r"C:\Program Files (x86)\Steinberg\VSTPlugins\",
            r"C:\Program Files\Common Files\VST3\",
            r"C:\Program Files (x86)\Common Files\VST3\",
            r"C:\Program Files\Common Files\CLAP\",
            r"C:\Program Files (x86)\Common Files\CLAP\",
        ])
    }

    fn trash_move(&self, _path: &Path) -> Result<PathBuf> {
        Err(PrmError::TrashUnsupported(self.name()).into())
    }

    fn open_in_browser(&self, path: &Path) -> Result<()> {
        spawn_opener("explorer", path)
    }
}

pub struct Unsupported;

impl Platform for Unsupported {
    fn name(&self) -> &'static str {
        "this platform"
    }

    fn default_roots(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn trash_move(&self, _path: &Path) -> Result<PathBuf> {
        Err(PrmError::TrashUnsupported(self.name()).into())
    }

    fn open_in_browser(&self, _path: &Path) -> Result<()> {
        Err(PrmError::OpenUnsupported(self.name()).into())
    }
}
