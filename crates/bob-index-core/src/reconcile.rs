//! Pruning of index entries whose directory has disappeared.

use crate::config::join_inside;
use crate::error::Result;
use crate::index::IndexStore;
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// What a stat call tells us about an indexed directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Missing,
    /// Stat failed for a reason other than "not found".
    Unknown,
}

impl Presence {
    /// Classify the outcome of a stat call.
    pub fn from_stat<T>(result: &io::Result<T>) -> Self {
        match result {
            Ok(_) => Presence::Present,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Presence::Missing,
            Err(_) => Presence::Unknown,
        }
    }

    /// Stat `path` and classify the result.
    pub fn probe(path: &Path) -> Self {
        Self::from_stat(&std::fs::metadata(path))
    }
}

/// Counters collected during one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub checked: usize,
    pub missing: usize,
    pub removed: usize,
    /// Entries kept because their existence could not be confirmed.
    pub uncertain: usize,
}

/// Removes entries whose backing directory no longer exists.
pub struct Reconciler<'a, S: IndexStore + ?Sized> {
    store: &'a S,
    site_root: &'a Path,
}

impl<'a, S: IndexStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S, site_root: &'a Path) -> Self {
        Self { store, site_root }
    }

    /// Reconcile using the real filesystem.
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        self.reconcile_with(Presence::probe)
    }

    /// Reconcile using `probe` to decide whether a directory exists.
    ///
    /// All paths are collected before anything is deleted. Only entries that
    /// probe as [`Presence::Missing`] are removed.
    pub fn reconcile_with<F>(&self, probe: F) -> Result<ReconcileReport>
    where
        F: Fn(&Path) -> Presence,
    {
        let paths = self.store.list_all_paths()?;
        let mut report = ReconcileReport {
            checked: paths.len(),
            ..Default::default()
        };

        let mut not_found = Vec::new();
        for path in paths {
            let location = join_inside(self.site_root, Path::new(&path));
            match probe(&location) {
                Presence::Present => {}
                Presence::Missing => not_found.push(path),
                Presence::Unknown => {
                    warn!("Keeping {}: existence could not be confirmed", path);
                    report.uncertain += 1;
                }
            }
        }
        report.missing = not_found.len();

        for path in &not_found {
            if self.store.delete(path)? {
                report.removed += 1;
            }
        }

        info!(
            "Checked {} entries, removed {} missing",
            report.checked, report.removed
        );
        Ok(report)
    }
}
