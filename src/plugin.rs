use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PrmError;

/// Bundle formats recognised by their filesystem extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PluginFormat {
    AAX,
    CLAP,
    AU,
    VST,
    VST3,
    Driver,
}

impl PluginFormat {
    pub const ALL: [PluginFormat; 6] = [
        PluginFormat::AAX,
        PluginFormat::CLAP,
        PluginFormat::AU,
        PluginFormat::VST,
        PluginFormat::VST3,
        PluginFormat::Driver,
    ];

    /// Bundle extension including the leading dot. Matching is case-sensitive.
    pub fn extension(&self) -> &'static str {
        match self {
            PluginFormat::AAX => ".aaxplugin",
            PluginFormat::CLAP => ".clap",
            PluginFormat::AU => ".component",
            PluginFormat::VST => ".vst",
            PluginFormat::VST3 => ".vst3",
            PluginFormat::Driver => ".driver",
        }
    }

    /// Display label shown next to plugin names.
    pub fn tag(&self) -> &'static str {
        match self {
            PluginFormat::AAX => "AAX",
            PluginFormat::CLAP => "CLAP",
            PluginFormat::AU => "AU",
            PluginFormat::VST => "VST",
            PluginFormat::VST3 => "VST3",
            PluginFormat::Driver => "Driver",
        }
    }

    pub fn from_extension(ext: &str) -> Option<PluginFormat> {
        Self::ALL.into_iter().find(|format| format.extension() == ext)
    }

    /// Parses a user supplied query tag (`aax`, `au`, `clap`, `vst`, `vst3`, `driver`).
    pub fn from_tag(tag: &str) -> Result<PluginFormat, PrmError> {
        Self::ALL
            .into_iter()
            .find(|format| format.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| PrmError::UnknownFormat(tag.to_string()))
    }

    /// Format of a bundle path, judged only by the extension of its final component.
    pub fn of_path(path: &Path) -> Option<PluginFormat> {
        let name = path.file_name()?.to_string_lossy();
        let (_, ext) = split_extension(&name);
        Self::from_extension(ext)
    }
}

impl fmt::Display for PluginFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Splits an entry name at its last `.`, returning the base name and the
/// extension with its dot. Names without a dot have an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// A plugin identified by its base name, with every bundle found under that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugin {
    pub name: String,
    pub paths: Vec<PathBuf>,
}

impl Plugin {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            paths: vec![path],
        }
    }

    /// One format per path, in path order. Duplicates are kept.
    pub fn formats(&self) -> Vec<PluginFormat> {
        self.paths
            .iter()
            .filter_map(|path| PluginFormat::of_path(path))
            .collect()
    }

    pub fn has_format(&self, format: PluginFormat) -> bool {
        self.paths
            .iter()
            .any(|path| PluginFormat::of_path(path) == Some(format))
    }

    /// Copy of this plugin holding only the paths of `format`.
    pub fn narrowed(&self, format: PluginFormat) -> Plugin {
        Plugin {
            name: self.name.clone(),
            paths: self
                .paths
                .iter()
                .filter(|path| PluginFormat::of_path(path) == Some(format))
                .cloned()
                .collect(),
        }
    }
}

/// Plugins keyed by base name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    plugins: BTreeMap<String, Plugin>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    /// Records a bundle found at `path`, appending to an existing plugin of the same name.
    pub fn add_path(&mut self, name: &str, path: PathBuf) {
        match self.plugins.get_mut(name) {
            Some(plugin) => plugin.paths.push(path),
            None => {
                self.plugins
                    .insert(name.to_string(), Plugin::new(name, path));
            }
        }
    }

    /// Inserts a whole plugin, concatenating its paths after any existing ones.
    pub fn insert(&mut self, plugin: Plugin) {
        match self.plugins.get_mut(&plugin.name) {
            Some(existing) => existing.paths.extend(plugin.paths),
            None => {
                self.plugins.insert(plugin.name.clone(), plugin);
            }
        }
    }

    /// Folds `other` into `self`. Existing paths stay first.
    pub fn merge(&mut self, other: Grouping) {
        for (_, plugin) in other.plugins {
            self.insert(plugin);
        }
    }

    /// Plugins ordered case-insensitively by name, exact name breaking ties.
    pub fn sorted(&self) -> Vec<&Plugin> {
        let mut plugins: Vec<&Plugin> = self.plugins.values().collect();
        plugins.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        plugins
    }

    /// Number of install paths, not plugin names.
    pub fn path_count(&self) -> usize {
        self.plugins.values().map(|plugin| plugin.paths.len()).sum()
    }

    /// Every path of every plugin, in sorted plugin order.
    pub fn all_paths(&self) -> Vec<&Path> {
        self.sorted()
            .into_iter()
            .flat_map(|plugin| plugin.paths.iter().map(PathBuf::as_path))
            .collect()
    }
}

impl FromIterator<Plugin> for Grouping {
    fn from_iter<I: IntoIterator<Item = Plugin>>(iter: I) -> Self {
        let mut grouping = Grouping::new();
        for plugin in iter {
            grouping.insert(plugin);
        }
        grouping
    }
}
