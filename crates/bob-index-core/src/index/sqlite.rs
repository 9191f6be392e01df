//! SQLite-backed release index.

use super::store::{IndexStore, ReleaseEntry};
use crate::config::StorageConfig;
use crate::error::{BobIndexError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Release index stored in a single SQLite table.
///
/// The database runs in WAL mode so a search can read a consistent snapshot
/// while another process is scanning.
pub struct SqliteReleaseIndex {
    db_path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteReleaseIndex {
    /// Open (or create) the index at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| BobIndexError::io_with_path(e, parent))?;
            }
        }

        let existed = db_path.exists();
        let conn = Connection::open(db_path).map_err(|e| BobIndexError::Database {
            message: format!("Failed to open database {}: {}", db_path.display(), e),
            source: Some(e),
        })?;

        if !existed {
            info!("Could not find database at {}, creating", db_path.display());
        }

        Self::configure_connection(&conn)?;
        Self::ensure_schema(&conn)?;

        Ok(Self {
            db_path: Some(db_path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway in-memory index.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::ensure_schema(&conn)?;

        Ok(Self {
            db_path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Database file location, `None` for in-memory indexes.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.busy_timeout(StorageConfig::BUSY_TIMEOUT)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            ",
        )
        .map_err(|e| BobIndexError::Database {
            message: format!("Failed to set pragmas: {}", e),
            source: Some(e),
        })?;
        Ok(())
    }

    fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS release (
                path TEXT,
                lower TEXT,
                name TEXT,
                UNIQUE(path)
            );

            -- Covers substring and exact-name lookups ordered by path
            CREATE INDEX IF NOT EXISTS idx_release_lower_path
                ON release(lower, path);
            "#,
        )
        .map_err(|e| BobIndexError::Database {
            message: format!("Failed to initialize schema: {}", e),
            source: Some(e),
        })?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| BobIndexError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })
    }

    fn collect_paths(conn: &Connection, sql: &str, query: Option<&str>) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = match query {
            Some(q) => stmt.query_map(params![q], path_column)?,
            None => stmt.query_map([], path_column)?,
        };
        let paths = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(paths)
    }
}

fn path_column(row: &Row<'_>) -> rusqlite::Result<String> {
    row.get(0)
}

impl IndexStore for SqliteReleaseIndex {
    fn upsert(&self, path: &str, name: &str) -> Result<bool> {
        let conn = self.conn()?;
        let entry = ReleaseEntry::new(path, name);

        let rows_affected = conn.execute(
            "INSERT OR IGNORE INTO release (path, lower, name) VALUES (?1, ?2, ?3)",
            params![entry.path, entry.lower, entry.name],
        )?;

        if rows_affected > 0 {
            debug!("INSERT {}", path);
        }

        Ok(rows_affected > 0)
    }

    fn delete(&self, path: &str) -> Result<bool> {
        let conn = self.conn()?;

        let rows_affected = conn.execute("DELETE FROM release WHERE path = ?1", params![path])?;

        if rows_affected > 0 {
            debug!("DELETE {}", path);
        }

        Ok(rows_affected > 0)
    }

    fn get(&self, path: &str) -> Result<Option<ReleaseEntry>> {
        let conn = self.conn()?;

        let entry = conn
            .query_row(
                "SELECT path, name, lower FROM release WHERE path = ?1",
                params![path],
                |row| {
                    Ok(ReleaseEntry {
                        path: row.get(0)?,
                        name: row.get(1)?,
                        lower: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(entry)
    }

    fn find_exact(&self, name: &str, case_sensitive: bool) -> Result<Option<String>> {
        let conn = self.conn()?;

        let path = if case_sensitive {
            conn.query_row(
                "SELECT path FROM release WHERE name = ?1 ORDER BY path DESC LIMIT 1",
                params![name],
                |row| row.get(0),
            )
        } else {
            conn.query_row(
                "SELECT path FROM release WHERE lower = ?1 ORDER BY path DESC LIMIT 1",
                params![name.to_lowercase()],
                |row| row.get(0),
            )
        }
        .optional()?;

        Ok(path)
    }

    fn find_substring(&self, query: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        Self::collect_paths(
            &conn,
            "SELECT path FROM release WHERE instr(lower, ?1) > 0 ORDER BY path DESC",
            Some(&query.to_lowercase()),
        )
    }

    fn list_all_paths(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        Self::collect_paths(&conn, "SELECT path FROM release", None)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM release", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
