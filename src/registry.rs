//! Plugin discovery across the configured root directories.
//!
//! Bundles are recognised purely by name: an entry whose extension is one of
//! the known plugin markers (`.aaxplugin`, `.clap`, `.component`, `.vst`,
//! `.vst3`, `.driver`) is a plugin and is never descended into. Entries with
//! no extension are treated as folders and scanned recursively. Everything
//! else is ignored.
//!
//! Scanning is best-effort: a root that cannot be read contributes nothing.
//! Entries are visited in name order.

use crate::config::PathSet;
use crate::plugin::{split_extension, Grouping, PluginFormat};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Scans every configured root and merges the results by plugin name.
pub fn scan_all(roots: &PathSet) -> Grouping {
    let mut grouping = Grouping::new();

    for root in roots.iter() {
        let found = scan_path(Path::new(root));
        debug!(root = %root, plugins = found.len(), "scanned root");
        grouping.merge(found);
    }

    grouping
}

/// Recursively scans a single directory for plugin bundles.
pub fn scan_path(dir: &Path) -> Grouping {
    let mut grouping = Grouping::new();

    let mut entries: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().collect(),
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return grouping;
        }
    };
    // Discovery order follows entry names so path lists are reproducible.
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        let (base, ext) = split_extension(&name);

        if ext.is_empty() {
            grouping.merge(scan_path(&path));
        } else if PluginFormat::from_extension(ext).is_some() {
            grouping.add_path(base, path);
        }
    }

    grouping
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn bundle(path: &Path) {
        fs::create_dir_all(path.join("Contents")).unwrap();
    }

    #[test]
    fn nested_bundles_group_under_one_name() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        bundle(&root.join("Synth.vst3"));
        bundle(&root.join("sub").join("Synth.component"));

        let grouping = scan_path(root);

        assert_eq!(grouping.len(), 1);
        let synth = grouping.get("Synth").unwrap();
        assert_eq!(
            synth.paths,
            vec![root.join("Synth.vst3"), root.join("sub").join("Synth.component")]
        );
        assert_eq!(synth.formats(), vec![PluginFormat::VST3, PluginFormat::AU]);
    }

    #[test]
    fn unknown_extensions_are_ignored() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("notes.txt"), "hello").unwrap();
        fs::create_dir_all(root.join("Presets.bank").join("Inner.vst3")).unwrap();

        assert!(scan_path(root).is_empty());
    }

    #[test]
    fn bundle_contents_are_not_scanned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let outer = root.join("Suite.vst3");
        fs::create_dir_all(outer.join("Contents").join("Helper.clap")).unwrap();

        let grouping = scan_path(root);

        assert_eq!(grouping.len(), 1);
        assert!(grouping.get("Helper").is_none());
    }

    #[test]
    fn plugin_files_count_as_bundles() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Gain.clap"), b"binary").unwrap();

        let grouping = scan_path(root);
        assert_eq!(grouping.get("Gain").unwrap().paths, vec![root.join("Gain.clap")]);
    }

    #[test]
    fn extension_is_stripped_exactly_once() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        bundle(&root.join("Odd.vst.vst3"));

        let grouping = scan_path(root);
        assert!(grouping.get("Odd.vst").is_some());
    }

    #[test]
    fn missing_root_yields_empty_grouping() {
        let dir = tempdir().unwrap();
        assert!(scan_path(&dir.path().join("does-not-exist")).is_empty());
    }

    #[test]
    fn roots_are_merged_by_name() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("A");
        let b = dir.path().join("B");
        bundle(&a.join("Reverb.clap"));
        bundle(&b.join("Reverb.clap"));
        bundle(&b.join("Delay.vst"));

        let roots = PathSet::from_iter([
            a.to_string_lossy().into_owned(),
            b.to_string_lossy().into_owned(),
        ]);
        let grouping = scan_all(&roots);

        // PathSet iterates in sorted order, so A is scanned before B.
        assert_eq!(
            grouping.get("Reverb").unwrap().paths,
            vec![a.join("Reverb.clap"), b.join("Reverb.clap")]
        );
        assert_eq!(grouping.get("Delay").unwrap().paths, vec![b.join("Delay.vst")]);
        assert_eq!(grouping.path_count(), 3);
    }

    #[test]
    fn unreadable_roots_are_skipped() {
        let dir = tempdir().unwrap();
        bundle(&dir.path().join("Keep.vst3"));
        let roots = PathSet::from_iter([
            dir.path().to_string_lossy().into_owned(),
            PathBuf::from("/definitely/not/here").to_string_lossy().into_owned(),
        ]);

        let grouping = scan_all(&roots);
        assert_eq!(grouping.len(), 1);
    }
}
