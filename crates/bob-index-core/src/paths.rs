//! Conversions between filesystem locations and indexed paths.
//!
//! Indexed paths are site-root relative, `/`-separated and start with `/`,
//! e.g. `/mp3/Artist-Album-2010-GRP`.

use crate::config::StorageConfig;
use std::path::{Component, Path};

/// Indexed form of `dir`, a directory below `site_root`.
///
/// Directories outside the site root keep their full path. Returns `None`
/// when the path is not valid UTF-8, since a lossy copy would name a
/// directory that does not exist.
pub fn index_path(site_root: &Path, dir: &Path) -> Option<String> {
    let relative = match dir.strip_prefix(site_root) {
        Ok(relative) => relative,
        Err(_) => return dir.to_str().map(str::to_string),
    };

    let mut indexed = String::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            indexed.push('/');
            indexed.push_str(segment.to_str()?);
        }
    }
    if indexed.is_empty() {
        indexed.push('/');
    }
    Some(indexed)
}

/// Drop a leading `/site` segment from a caller-supplied path.
pub fn strip_storage_prefix(path: &str) -> &str {
    let prefix = StorageConfig::STORAGE_PREFIX;
    match path.strip_prefix(prefix) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Indexed path of release `name` inside directory `path`.
pub fn entry_path(path: &str, name: &str) -> String {
    let parent = strip_storage_prefix(path).trim_end_matches('/');
    format!("{}/{}", parent, name)
}
