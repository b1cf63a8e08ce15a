//! `SQLite` key/value backend.
//!
//! A single `kv(key TEXT PRIMARY KEY, value TEXT)` table, upserting on set.
//! The connection sits behind a `Mutex` so the backend satisfies the
//! `Send + Sync` bound of [`KeyValueStore`].

use crate::storage::traits::KeyValueStore;
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Acquires the connection lock with poison recovery.
///
/// If the mutex is poisoned by a panic in a previous critical section, the
/// connection state itself is still valid, so we recover the inner value
/// and log a warning rather than cascading the failure.
fn acquire_lock(mutex: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            poisoned.into_inner()
        },
    }
}

/// `SQLite`-backed key/value store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_db_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let conn = Connection::open(path).map_err(|e| Error::OperationFailed {
            operation: "open_database".to_string(),
            cause: e.to_string(),
        })?;

        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory database, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::OperationFailed {
            operation: "open_database".to_string(),
            cause: e.to_string(),
        })?;

        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "init_schema".to_string(),
            cause: e.to_string(),
        })?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = acquire_lock(&self.conn);
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| Error::OperationFailed {
            operation: "get_value".to_string(),
            cause: e.to_string(),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "set_value".to_string(),
            cause: e.to_string(),
        })?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let conn = acquire_lock(&self.conn);
        let changed = conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| Error::OperationFailed {
                operation: "remove_value".to_string(),
                cause: e.to_string(),
            })?;
        Ok(changed > 0)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt =
            conn.prepare("SELECT key FROM kv ORDER BY key")
                .map_err(|e| Error::OperationFailed {
                    operation: "list_keys".to_string(),
                    cause: e.to_string(),
                })?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::OperationFailed {
                operation: "list_keys".to_string(),
                cause: e.to_string(),
            })?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row.map_err(|e| Error::OperationFailed {
                operation: "list_keys".to_string(),
                cause: e.to_string(),
            })?);
        }
        Ok(keys)
    }
}
