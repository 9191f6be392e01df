//! Single-entry add and delete, driven by external hooks.

use crate::error::Result;
use crate::filter::is_noise;
use crate::index::IndexStore;
use crate::paths::entry_path;

/// Index release `name` inside `path` unless it is a noise directory.
///
/// Returns whether a new entry was created.
pub fn add_one<S: IndexStore + ?Sized>(store: &S, path: &str, name: &str) -> Result<bool> {
    let full_path = entry_path(path, name);
    if is_noise(&full_path) {
        return Ok(false);
    }
    store.upsert(&full_path, name)
}

/// Remove release `name` inside `path`. No filtering is applied.
pub fn delete_one<S: IndexStore + ?Sized>(store: &S, path: &str, name: &str) -> Result<bool> {
    store.delete(&entry_path(path, name))
}
