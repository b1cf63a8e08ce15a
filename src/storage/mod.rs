//! Storage layer.
//!
//! Everything the engine persists goes through the [`KeyValueStore`]
//! abstraction under a small set of well-known keys. The backend is chosen
//! from configuration: filesystem (default) or `SQLite`, with an in-memory
//! variant for tests and embedding.

pub mod kv;
pub mod traits;

pub use kv::{FileStore, MemoryStore, SqliteStore};
pub use traits::KeyValueStore;

use crate::config::{NotecoreConfig, StorageKind};
use crate::Result;

/// Storage key for the serialized note collection.
pub const NOTES_KEY: &str = "notes-app-data";

/// Storage key for the offline-mode flag (`"true"` / `"false"`).
pub const OFFLINE_MODE_KEY: &str = "offline-mode";

/// Storage key for the theme preference (`"light"` / `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Opens the key/value backend selected by configuration.
///
/// # Errors
///
/// Returns an error if the backing directory or database cannot be created.
pub fn open_backend(config: &NotecoreConfig) -> Result<Box<dyn KeyValueStore>> {
    match config.storage {
        StorageKind::Filesystem => Ok(Box::new(FileStore::with_create(&config.data_dir)?)),
        StorageKind::Sqlite => Ok(Box::new(SqliteStore::open(
            config.data_dir.join("notecore.db"),
        )?)),
    }
}
