//! Index store trait and entry type.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One indexed release directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEntry {
    /// Location below the site root, e.g. `/mp3/Artist-Album-2010-GRP`.
    pub path: String,
    /// Base name as first seen.
    pub name: String,
    /// Lowercased `name`, used for case-insensitive matching.
    pub lower: String,
}

impl ReleaseEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            lower: name.to_lowercase(),
            name,
        }
    }
}

/// Storage backend for the release index.
///
/// Every mutation is durable when the call returns. All operations are
/// synchronous to match rusqlite's API.
pub trait IndexStore: Send + Sync {
    /// Insert an entry unless one already exists for `path`.
    ///
    /// Existing entries are never updated. Returns whether a row was created.
    fn upsert(&self, path: &str, name: &str) -> Result<bool>;

    /// Remove the entry for `path`. Returns whether a row was removed.
    fn delete(&self, path: &str) -> Result<bool>;

    /// Fetch the entry stored for `path`.
    fn get(&self, path: &str) -> Result<Option<ReleaseEntry>>;

    /// Find a path whose name equals `name`.
    ///
    /// Case-insensitive lookups compare against the stored lowercase name.
    /// When several entries share a name, the greatest path wins.
    fn find_exact(&self, name: &str, case_sensitive: bool) -> Result<Option<String>>;

    /// All paths whose lowercase name contains `query`, ordered by path descending.
    fn find_substring(&self, query: &str) -> Result<Vec<String>>;

    /// Every indexed path.
    fn list_all_paths(&self) -> Result<Vec<String>>;

    /// Number of indexed entries.
    fn count(&self) -> Result<usize>;
}
