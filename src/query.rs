//! Narrowing a grouping by name and format.
//!
//! Filters never modify their input; they build a new grouping.

use crate::plugin::{Grouping, PluginFormat};

/// Keeps plugins whose name contains `search`, ignoring case.
pub fn filter_by_name(grouping: &Grouping, search: &str) -> Grouping {
    let search = search.to_lowercase();
    grouping
        .plugins()
        .filter(|plugin| plugin.name.to_lowercase().contains(&search))
        .cloned()
        .collect()
}

/// Keeps plugins with at least one path of `format`, each reduced to just those paths.
pub fn filter_by_format(grouping: &Grouping, format: PluginFormat) -> Grouping {
    grouping
        .plugins()
        .filter(|plugin| plugin.has_format(format))
        .map(|plugin| plugin.narrowed(format))
        .collect()
}

/// Name filter first, then the optional format filter.
pub fn apply_query(grouping: &Grouping, search: &str, format: Option<PluginFormat>) -> Grouping {
    let by_name = filter_by_name(grouping, search);
    match format {
        Some(format) => filter_by_format(&by_name, format),
        None => by_name,
    }
}
