//! The user-editable list of root directories to scan.
//!
//! Roots live in `paths.txt` inside the config directory, one per line. The
//! file is created on first run with the host platform's default roots.

use crate::error::PrmError;
use crate::platform::Platform;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the config directory, mostly for tests and portable setups.
pub const CONFIG_DIR_ENV: &str = "PRM_CONFIG_DIR";

const PATHS_FILE_NAME: &str = "paths.txt";

/// Deduplicated set of configured roots, already `~`-expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    roots: BTreeSet<String>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, root: String) -> bool {
        self.roots.insert(root)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.roots.iter()
    }
}

impl FromIterator<String> for PathSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

/// Where the configuration lives and how `~/` expands.
#[derive(Debug, Clone)]
pub struct Config {
    pub dir: PathBuf,
    pub home: Option<PathBuf>,
}

impl Config {
    /// Resolves the config directory from `PRM_CONFIG_DIR` or `~/.config/prm`.
    pub fn locate() -> Result<Self> {
        let home = dirs::home_dir();
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => home
                .as_ref()
                .map(|home| home.join(".config").join("prm"))
                .ok_or(PrmError::NoHomeDir)?,
        };
        Ok(Self { dir, home })
    }

    pub fn paths_file(&self) -> PathBuf {
        self.dir.join(PATHS_FILE_NAME)
    }

    /// Loads the configured roots, creating the file with defaults if missing.
    ///
    /// Failures are reported once and degrade to an empty set; a run with no
    /// roots simply finds no plugins.
    pub fn load_paths(&self, platform: &dyn Platform) -> PathSet {
        match self.try_load_paths(platform) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "failed to load paths file");
                eprintln!("error creating paths file, unable to continue");
                PathSet::new()
            }
        }
    }

    fn try_load_paths(&self, platform: &dyn Platform) -> Result<PathSet> {
        let paths_file = self.paths_file();
        if !paths_file.exists() {
            self.write_defaults(&paths_file, platform)?;
        }

        let content = fs::read_to_string(&paths_file)
            .context(format!("Failed to read paths file: {:?}", paths_file))?;
        Ok(parse_paths(&content, self.home.as_deref()))
    }

    fn write_defaults(&self, paths_file: &Path, platform: &dyn Platform) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .context(format!("Failed to create config directory: {:?}", self.dir))?;

        let mut content = String::new();
        for root in platform.default_roots() {
            content.push_str(&root);
            content.push('\n');
        }
        fs::write(paths_file, content)
            .context(format!("Failed to create paths file: {:?}", paths_file))?;

        debug!(path = %paths_file.display(), "created default paths file");
        Ok(())
    }
}

/// Parses the paths file: one root per line, trimmed, blank lines skipped.
pub fn parse_paths(content: &str, home: Option<&Path>) -> PathSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| expand_home(line, home))
        .collect()
}

/// Expands a leading `~/` to the home directory.
pub fn expand_home(path: &str, home: Option<&Path>) -> String {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}
