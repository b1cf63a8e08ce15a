//! Portable backup document.

use super::Note;
use crate::current_timestamp_ms;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Schema version tag written into every exported document.
///
/// Checked for presence on import, not for value; it exists for
/// forward-compatibility signaling only.
pub const BACKUP_VERSION: &str = "1.0";

/// A versioned, portable snapshot of the full note collection.
///
/// Created transiently by the export path and consumed transiently by the
/// import path; never persisted itself except as the file a user keeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    /// The exported notes, in collection order.
    pub data: Vec<Note>,
    /// Creation time of the backup (Unix epoch milliseconds).
    pub timestamp: i64,
    /// Schema version tag.
    pub version: String,
}

impl BackupDocument {
    /// Wraps a collection in a backup document stamped with the current time.
    #[must_use]
    pub fn new(data: Vec<Note>) -> Self {
        Self {
            data,
            timestamp: current_timestamp_ms(),
            version: BACKUP_VERSION.to_string(),
        }
    }

    /// Returns the number of notes in the document.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the document carries no notes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Builds the date-stamped local backup filename for today.
///
/// Exports within the same day target the same name and overwrite each
/// other, which is the intended collision behavior.
#[must_use]
pub fn backup_file_name() -> String {
    format!("note-backup-{}.json", Local::now().format("%Y-%m-%d"))
}
