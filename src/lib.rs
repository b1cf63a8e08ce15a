//! # Notecore
//!
//! A local-first notes engine with durable storage, search, and backup.
//!
//! Notecore owns an ordered collection of notes persisted as a single
//! document in a key/value backend, and layers search, connectivity
//! probing, and backup/restore on top of it.
//!
//! ## Features
//!
//! - CRUD and case-insensitive substring search over a note collection
//! - Pluggable key/value backends (filesystem, `SQLite`, in-memory)
//! - Whole-collection persistence: every mutation is one atomic write
//! - Date-stamped local backups and a gated remote-backup path
//! - Change notifications via a broadcast bus per store
//!
//! ## Example
//!
//! ```rust,ignore
//! use notecore::{NoteStore, storage::MemoryStore};
//!
//! let mut store = NoteStore::new(Box::new(MemoryStore::new()));
//! let note = store.create("Groceries", "milk, eggs")?;
//! assert_eq!(store.list()?[0].id, note.id);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::{NotecoreConfig, StorageKind};
pub use models::{BackupDocument, EventMeta, Note, NoteId, StoreEvent};
pub use services::{
    BackupOutcome, BackupService, ConnectivityProbe, NoteStore, ReachabilityCheck, SettingsStore,
    Theme,
};
pub use storage::KeyValueStore;

/// Error type for notecore operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty note title, unknown format or theme name |
/// | `NotFound` | Updating a note id that does not exist |
/// | `StorageCorrupt` | Stored notes payload fails to deserialize |
/// | `ValidationError` | Backup document malformed, or import file unreadable |
/// | `OfflineModeActive` | Remote backup attempted with the offline flag set |
/// | `NoNetwork` | Remote backup attempted while unreachable |
/// | `OperationFailed` | I/O errors, database errors, serialization failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A note title is empty or whitespace-only
    /// - An unknown export format or theme name is given
    /// - A storage key contains unsafe characters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The referenced note does not exist.
    #[error("note not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The persisted note collection failed to deserialize.
    ///
    /// Readers recover from this by treating the collection as empty;
    /// the variant exists so the condition can be logged with its cause.
    #[error("stored notes are corrupt: {cause}")]
    StorageCorrupt {
        /// The underlying deserialization error.
        cause: String,
    },

    /// A backup document was rejected during import.
    ///
    /// Raised when:
    /// - The import file cannot be read
    /// - The document is not valid JSON
    /// - The document lacks a notes array
    /// - The first note is missing id, title, or content
    #[error("invalid backup document: {reason}")]
    ValidationError {
        /// Why the document was rejected.
        reason: String,
    },

    /// Remote backup refused because offline mode is enabled.
    #[error("offline mode is active; remote backup refused")]
    OfflineModeActive,

    /// Remote backup refused because the network is unreachable.
    #[error("network unreachable; remote backup refused")]
    NoNetwork,

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem or `SQLite` operations fail
    /// - Serialization of the collection fails
    /// - Configuration files cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for notecore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in milliseconds.
///
/// Notes and backup documents carry millisecond-precision timestamps, so
/// this is the single clock the crate reads. Falls back to 0 if the system
/// clock is before the Unix epoch.
///
/// # Examples
///
/// ```rust
/// use notecore::current_timestamp_ms;
///
/// let ts = current_timestamp_ms();
/// assert!(ts > 0);
/// ```
#[must_use]
pub fn current_timestamp_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("title is required".to_string());
        assert_eq!(err.to_string(), "invalid input: title is required");

        let err = Error::NotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "note not found: abc");

        let err = Error::ValidationError {
            reason: "missing notes array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid backup document: missing notes array"
        );

        let err = Error::OperationFailed {
            operation: "write".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'write' failed: disk full");
    }

    #[test]
    fn test_current_timestamp_ms_advances() {
        let a = current_timestamp_ms();
        let b = current_timestamp_ms();
        assert!(b >= a);
    }
}
