//! Bob Index - searchable index of release directories on a glftpd site.
//!
//! This crate scans the site tree for release directories, keeps them in a
//! SQLite index, prunes entries whose directory vanished, and answers
//! substring searches and exact-name admission checks.
//!
//! # Example
//!
//! ```rust,no_run
//! use bob_index::{BobIndex, IndexConfig};
//!
//! fn main() -> bob_index::Result<()> {
//!     let index = BobIndex::open(IndexConfig::default())?;
//!
//!     let report = index.scan("/mp3")?;
//!     println!("Indexed {} new releases", report.inserted);
//!
//!     let outcome = index.search("album", 50)?;
//!     println!("{} result(s)", outcome.total_matches);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entries;
pub mod error;
pub mod filter;
pub mod gate;
pub mod index;
pub mod paths;
pub mod reconcile;
pub mod scanner;
pub mod search;

pub use config::{Defaults, IndexConfig};
pub use error::{BobIndexError, Result};
pub use filter::is_noise;
pub use gate::{Admission, AdmissionGate};
pub use index::{IndexStore, ReleaseEntry, SqliteReleaseIndex};
pub use reconcile::{Presence, ReconcileReport, Reconciler};
pub use scanner::{ScanReport, Scanner};
pub use search::{SearchEngine, SearchOutcome};

use std::path::PathBuf;

/// Entry point composing every operation around one index store.
///
/// One process run opens the store once, performs a single operation and
/// drops it.
pub struct BobIndex<S: IndexStore = SqliteReleaseIndex> {
    config: IndexConfig,
    site_root: PathBuf,
    store: S,
}

impl BobIndex<SqliteReleaseIndex> {
    /// Open the SQLite index described by `config`.
    pub fn open(config: IndexConfig) -> Result<Self> {
        let store = SqliteReleaseIndex::open(config.database_path())?;
        Ok(Self::with_store(config, store))
    }
}

impl<S: IndexStore> BobIndex<S> {
    /// Wrap an already opened store.
    pub fn with_store(config: IndexConfig, store: S) -> Self {
        let site_root = config.site_root();
        Self {
            config,
            site_root,
            store,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scan `sub_path` below the site root.
    pub fn scan(&self, sub_path: &str) -> Result<ScanReport> {
        Scanner::new(&self.store, &self.site_root).scan(sub_path)
    }

    /// Drop entries whose directory no longer exists.
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        Reconciler::new(&self.store, &self.site_root).reconcile()
    }

    pub fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        SearchEngine::new(&self.store).search(query, limit)
    }

    pub fn exists(&self, name: &str, case_sensitive: bool) -> Result<bool> {
        AdmissionGate::new(&self.store).exists(name, case_sensitive)
    }

    pub fn admission(&self, name: &str, case_sensitive: bool) -> Result<Admission> {
        AdmissionGate::new(&self.store).check(name, case_sensitive)
    }

    pub fn add_one(&self, path: &str, name: &str) -> Result<bool> {
        entries::add_one(&self.store, path, name)
    }

    pub fn delete_one(&self, path: &str, name: &str) -> Result<bool> {
        entries::delete_one(&self.store, path, name)
    }
}
