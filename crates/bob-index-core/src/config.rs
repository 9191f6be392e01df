//! Configuration for the release index.
//!
//! An [`IndexConfig`] is built once at startup and handed to [`crate::BobIndex`];
//! nothing in the library reads process-wide state.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Built-in defaults matching a stock glftpd layout.
pub struct Defaults;

impl Defaults {
    pub const GL_ROOT: &'static str = "/home/ftpd/glftpd";
    pub const DB_PATH: &'static str = "/ftp-data/bob/bob-index.db";
    pub const SCAN_PATH: &'static str = "/mp3";
    pub const SEARCH_LIMIT: usize = 50;
    pub const SEARCH_STRING: &'static str = "test";
    pub const ENTRY_PATH: &'static str = "/private/";
    pub const ENTRY_NAME: &'static str = "test";
}

/// Storage layout constants.
pub struct StorageConfig;

impl StorageConfig {
    /// Directory under the gl root that holds every release.
    pub const SITE_DIR_NAME: &'static str = "site";
    /// Leading segment stripped from externally supplied paths.
    pub const STORAGE_PREFIX: &'static str = "/site";
    pub const BUSY_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Locations the index operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// glftpd root directory.
    pub gl_root: PathBuf,
    /// Database file, interpreted inside the gl root.
    pub db_path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            gl_root: PathBuf::from(Defaults::GL_ROOT),
            db_path: PathBuf::from(Defaults::DB_PATH),
        }
    }
}

impl IndexConfig {
    pub fn new(gl_root: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            gl_root: gl_root.into(),
            db_path: db_path.into(),
        }
    }

    /// Full path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        join_inside(&self.gl_root, &self.db_path)
    }

    /// Directory that all indexed paths are relative to.
    pub fn site_root(&self) -> PathBuf {
        self.gl_root.join(StorageConfig::SITE_DIR_NAME)
    }
}

/// Join `path` below `root` even when `path` is written absolute.
pub(crate) fn join_inside(root: &Path, path: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect();
    root.join(relative)
}
