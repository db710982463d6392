//! prm core library
//!
//! Finds, lists, and removes audio plugin bundles (AAX, CLAP, AU, VST, VST3,
//! drivers) installed under a user-editable set of root directories.
//!
//! # Overview
//!
//! ## Configuration (`config` module)
//! - `Config::load_paths()` - Read `paths.txt`, creating it with platform defaults on first run
//!
//! ## Discovery (`registry` module)
//! - `scan_path()` - Recursively find bundles under one root
//! - `scan_all()` - Scan every root and merge same-named plugins
//!
//! ## Queries (`query` module)
//! - `filter_by_name()` / `filter_by_format()` / `apply_query()`
//!
//! ## Operations (`operations` module)
//! - `sized_paths()` - Disk usage per install path, largest first
//! - `remove_plugins()` - Confirmed move-to-trash of every matched path
//!
//! ## Output (`report` module)
//! - By name, by path, by size, count and JSON renderings
//!
//! Bundles are only ever identified by name; their contents are never read.

pub mod config;
pub mod error;
pub mod operations;
pub mod platform;
pub mod plugin;
pub mod query;
pub mod registry;
pub mod report;

pub use config::{Config, PathSet};
pub use error::PrmError;
pub use platform::Platform;
pub use plugin::{Grouping, Plugin, PluginFormat};
