//! Recursive discovery of release directories.

use crate::config::join_inside;
use crate::error::{BobIndexError, Result};
use crate::filter::is_noise;
use crate::index::IndexStore;
use crate::paths::index_path;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Counters collected during one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Directories classified, including pruned ones.
    pub visited: usize,
    /// Entries newly written to the index.
    pub inserted: usize,
    /// Noise directories skipped together with their subtrees.
    pub pruned: usize,
    /// Directories that could not be read or whose name is not UTF-8.
    pub errors: usize,
}

/// Walks a subtree of the site root and indexes every release directory.
pub struct Scanner<'a, S: IndexStore + ?Sized> {
    store: &'a S,
    site_root: &'a Path,
}

impl<'a, S: IndexStore + ?Sized> Scanner<'a, S> {
    pub fn new(store: &'a S, site_root: &'a Path) -> Self {
        Self { store, site_root }
    }

    /// Scan `sub_path` (relative to the site root) depth-first.
    ///
    /// Noise directories are neither indexed nor descended into. Unreadable
    /// directories are logged and skipped; a subtree root that cannot be
    /// opened at all yields [`BobIndexError::TraversalStart`]. Store failures
    /// abort the scan.
    pub fn scan(&self, sub_path: &str) -> Result<ScanReport> {
        let root = join_inside(self.site_root, Path::new(sub_path));

        match std::fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(BobIndexError::TraversalStart {
                    path: root,
                    message: "not a directory".to_string(),
                })
            }
            Err(e) => {
                return Err(BobIndexError::TraversalStart {
                    path: root,
                    message: e.to_string(),
                })
            }
        }

        info!("Scanning {}", root.display());
        let mut report = ScanReport::default();
        let mut walker = WalkDir::new(&root).into_iter();

        while let Some(next) = walker.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("error walking: {}", e);
                    report.errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Some(path) = index_path(self.site_root, entry.path()) else {
                warn!("Skipping non UTF-8 path {}", entry.path().display());
                report.errors += 1;
                walker.skip_current_dir();
                continue;
            };
            // The site root itself is not a release, even when it is the scan root.
            if path == "/" {
                continue;
            }

            report.visited += 1;
            if is_noise(&path) {
                debug!("SKIP {}", path);
                report.pruned += 1;
                walker.skip_current_dir();
                continue;
            }

            let name = path.rsplit('/').next().unwrap_or(path.as_str());
            if self.store.upsert(&path, name)? {
                report.inserted += 1;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SqliteReleaseIndex;
    use std::fs;
    use tempfile::TempDir;

    fn create_site() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let site = temp_dir.path().join("site");
        fs::create_dir_all(site.join("mp3/artist/Album_2010/cd1/deeper")).unwrap();
        fs::create_dir_all(site.join("mp3/artist/Album_2010/Cover")).unwrap();
        fs::create_dir_all(site.join("mp3/artist/Other_2011")).unwrap();
        fs::create_dir_all(site.join("mp3/_incoming/Hidden_2012")).unwrap();
        fs::write(site.join("mp3/artist/Album_2010/01-track.mp3"), b"x").unwrap();
        temp_dir
    }

    fn sorted_paths(index: &SqliteReleaseIndex) -> Vec<String> {
        let mut paths = index.list_all_paths().unwrap();
        paths.sort();
        paths
    }

    #[test]
    fn test_scan_indexes_releases_and_prunes_noise() {
        let temp = create_site();
        let site = temp.path().join("site");
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        let report = Scanner::new(&index, &site).scan("/mp3").unwrap();

        assert_eq!(
            sorted_paths(&index),
            vec![
                "/mp3",
                "/mp3/artist",
                "/mp3/artist/Album_2010",
                "/mp3/artist/Other_2011",
            ]
        );
        assert_eq!(report.inserted, 4);
        assert_eq!(report.pruned, 3);
        assert_eq!(report.errors, 0);
    }

    #[test]
    fn test_pruned_subtree_is_not_visited() {
        let temp = create_site();
        let site = temp.path().join("site");
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        let report = Scanner::new(&index, &site).scan("/mp3").unwrap();

        // cd1/deeper and _incoming/Hidden_2012 are never classified
        assert_eq!(report.visited, 7);
        assert!(index.get("/mp3/artist/Album_2010/cd1/deeper").unwrap().is_none());
        assert!(index.get("/mp3/_incoming/Hidden_2012").unwrap().is_none());
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let temp = create_site();
        let site = temp.path().join("site");
        let index = SqliteReleaseIndex::open_in_memory().unwrap();
        let scanner = Scanner::new(&index, &site);

        scanner.scan("/mp3").unwrap();
        let before = index.get("/mp3/artist/Album_2010").unwrap();
        let second = scanner.scan("/mp3").unwrap();

        assert_eq!(second.inserted, 0);
        assert_eq!(index.count().unwrap(), 4);
        assert_eq!(index.get("/mp3/artist/Album_2010").unwrap(), before);
    }

    #[test]
    fn test_scan_keeps_display_name_casing() {
        let temp = create_site();
        let site = temp.path().join("site");
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        Scanner::new(&index, &site).scan("/mp3/artist").unwrap();

        let entry = index.get("/mp3/artist/Other_2011").unwrap().unwrap();
        assert_eq!(entry.name, "Other_2011");
        assert_eq!(entry.lower, "other_2011");
    }

    #[test]
    fn test_missing_root_is_traversal_start_error() {
        let temp = TempDir::new().unwrap();
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        let err = Scanner::new(&index, temp.path())
            .scan("/does-not-exist")
            .unwrap_err();

        assert!(matches!(err, BobIndexError::TraversalStart { .. }));
        assert!(!err.is_fatal());
        assert_eq!(index.count().unwrap(), 0);
    }

    #[test]
    fn test_noise_root_indexes_nothing() {
        let temp = create_site();
        let site = temp.path().join("site");
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        let report = Scanner::new(&index, &site)
            .scan("/mp3/artist/Album_2010/cd1")
            .unwrap();

        assert_eq!(report.pruned, 1);
        assert_eq!(index.count().unwrap(), 0);
    }

    #[test]
    fn test_scan_from_site_root_skips_root_only() {
        let temp = create_site();
        let site = temp.path().join("site");
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        let report = Scanner::new(&index, &site).scan("/").unwrap();

        assert!(index.get("/").unwrap().is_none());
        assert!(index.get("/mp3").unwrap().is_some());
        assert!(index.get("/mp3/artist/Other_2011").unwrap().is_some());
        assert_eq!(report.inserted, 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_dir_is_never_indexed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        let latin1 = site.join("mp3").join(OsStr::from_bytes(b"Caf\xe9_Album_2010"));
        fs::create_dir_all(latin1.join("Inner_2010")).unwrap();
        fs::create_dir_all(site.join("mp3/Plain_2011")).unwrap();
        let index = SqliteReleaseIndex::open_in_memory().unwrap();

        let report = Scanner::new(&index, &site).scan("/mp3").unwrap();

        assert_eq!(report.errors, 1);
        let mut paths = index.list_all_paths().unwrap();
        paths.sort();
        assert_eq!(paths, vec!["/mp3", "/mp3/Plain_2011"]);

        // Nothing lossy was stored, so cleanup has nothing to remove
        let cleanup = crate::reconcile::Reconciler::new(&index, &site)
            .reconcile()
            .unwrap();
        assert_eq!(cleanup.removed, 0);
        assert!(latin1.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_dir_does_not_abort_scan() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        let locked = site.join("mp3/Locked_2010");
        fs::create_dir_all(locked.join("Inner")).unwrap();
        fs::create_dir_all(site.join("mp3/Open_2011")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to a privileged user
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let index = SqliteReleaseIndex::open_in_memory().unwrap();
        let result = Scanner::new(&index, &site).scan("/mp3");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let report = result.unwrap();
        assert_eq!(report.errors, 1);
        assert!(index.get("/mp3/Open_2011").unwrap().is_some());
        assert!(index.get("/mp3/Locked_2010").unwrap().is_some());
        assert!(index.get("/mp3/Locked_2010/Inner").unwrap().is_none());
    }
}
