use std::{
    path::Path,
    sync::{Mutex, PoisonError},
};

use crate::{backend::Backend, error::BackendError};

/// Durable storage backend over a single SQLite database file.
///
/// All entries live in one `entries` table mapping keys to raw text. Data
/// written through this backend survives process restarts; reopening the same
/// path observes earlier writes.
pub struct SqliteBackend {
    conn: Mutex<rusqlite::Connection>,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend").finish()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> BackendError {
    BackendError::Unavailable("durable store lock poisoned".to_string())
}

impl SqliteBackend {
    /// Opens (creating if necessary) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        log::debug!("opening durable store at {}", path.as_ref().display());
        Self::initialize(rusqlite::Connection::open(path)?)
    }

    /// Opens a private in-memory database, useful for tests that want SQLite
    /// semantics without touching the filesystem.
    pub fn open_in_memory() -> Result<Self, BackendError> {
        Self::initialize(rusqlite::Connection::open_in_memory()?)
    }

    fn initialize(conn: rusqlite::Connection) -> Result<Self, BackendError> {
        // Set WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl Backend for SqliteBackend {
    fn get_raw(&self, key: &str) -> Result<Option<String>, BackendError> {
        let conn = self.conn.lock().map_err(poisoned)?;
        let mut stmt = conn.prepare("SELECT value FROM entries WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get::<_, String>(0)?))
        } else {
            Ok(None)
        }
    }

    fn set_raw(&self, key: &str, text: &str) -> Result<(), BackendError> {
        let conn = self.conn.lock().map_err(poisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO entries (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, text],
        )?;
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> Result<(), BackendError> {
        let conn = self.conn.lock().map_err(poisoned)?;
        conn.execute("DELETE FROM entries WHERE key = ?1", [key])?;
        Ok(())
    }
}
