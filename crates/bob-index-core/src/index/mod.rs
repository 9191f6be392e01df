//! Persistent release index.
//!
//! The index maps a release path (relative to the site root) to the release's
//! display name. It is the only durable state; scanners and the reconciler
//! write to it, search and the admission gate read from it.

mod sqlite;
mod store;

pub use sqlite::SqliteReleaseIndex;
pub use store::{IndexStore, ReleaseEntry};
