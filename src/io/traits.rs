//! Core traits and intermediate types for import/export.
//!
//! Defines the [`BackupSource`] and [`ExportSink`] traits that format
//! adapters implement, plus the lenient import-side mirrors of the backup
//! document.

use crate::models::Note;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Intermediate representation of one imported note.
///
/// All fields are optional so that a document can be parsed before it is
/// validated; validation decides what is required and what gets defaulted.
///
/// # Field Mapping
///
/// | Field | Required | Default |
/// |-------|----------|---------|
/// | `id` | First element only | Fresh id |
/// | `title` | First element only | Empty string |
/// | `content` | First element only | Empty string |
/// | `created_at` | No | Document timestamp |
/// | `updated_at` | No | `created_at` |
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedNote {
    /// Note identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Note title.
    #[serde(default)]
    pub title: Option<String>,

    /// Note content.
    #[serde(default)]
    pub content: Option<String>,

    /// Creation timestamp (Unix epoch milliseconds).
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<i64>,

    /// Last update timestamp (Unix epoch milliseconds).
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<i64>,
}

impl ImportedNote {
    /// Creates an imported note with id, title, and content set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            content: Some(content.into()),
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the timestamps.
    #[must_use]
    pub const fn with_timestamps(mut self, created_at: i64, updated_at: i64) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }
}

/// Intermediate representation of a parsed backup document.
///
/// Accepts the legacy aliases the original file format went through:
/// `notes` for the data array and `createdAt` for the document timestamp.
/// The version tag may be a string or an integer, so it is kept as a raw
/// JSON value until validation looks at it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportedBackup {
    /// The notes array. `None` means the document lacked one entirely.
    #[serde(default, alias = "notes")]
    pub data: Option<Vec<ImportedNote>>,

    /// Creation time of the backup (Unix epoch milliseconds).
    #[serde(default, alias = "createdAt")]
    pub timestamp: Option<i64>,

    /// Schema version tag, string or integer.
    #[serde(default)]
    pub version: Option<serde_json::Value>,
}

/// Source of one backup document.
///
/// A backup is a single versioned object, not a record stream, so the
/// source reads the whole document in one call.
pub trait BackupSource {
    /// Reads and parses the document.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the document cannot be read or is not
    /// parseable in the source's format.
    fn read_document(&mut self) -> Result<ImportedBackup>;
}

/// Sink for exported notes.
///
/// # Lifecycle
///
/// 1. Create sink with output destination
/// 2. Call `write()` for each note, in collection order
/// 3. Call `finalize()` to complete the export
pub trait ExportSink {
    /// Writes a single note to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or I/O fails.
    fn write(&mut self, note: &Note) -> Result<()>;

    /// Finalizes the export, writing any wrapper or footer and flushing
    /// buffers. Consumes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_imported_backup_aliases() {
        let legacy = r#"{"notes": [{"id": "a", "title": "T", "content": "c"}], "createdAt": 7}"#;
        let doc: ImportedBackup = serde_json::from_str(legacy).unwrap();

        assert_eq!(doc.data.as_ref().unwrap().len(), 1);
        assert_eq!(doc.timestamp, Some(7));
        assert!(doc.version.is_none());
    }

    #[test]
    fn test_imported_backup_version_string_or_integer() {
        let doc: ImportedBackup =
            serde_json::from_str(r#"{"data": [], "version": "1.0"}"#).unwrap();
        assert_eq!(doc.version, Some(serde_json::json!("1.0")));

        let doc: ImportedBackup = serde_json::from_str(r#"{"data": [], "version": 1}"#).unwrap();
        assert_eq!(doc.version, Some(serde_json::json!(1)));
    }

    #[test]
    fn test_imported_note_partial_fields() {
        let note: ImportedNote = serde_json::from_str(r#"{"title": "only title"}"#).unwrap();
        assert!(note.id.is_none());
        assert_eq!(note.title.as_deref(), Some("only title"));
        assert!(note.created_at.is_none());
    }

    #[test]
    fn test_imported_note_camel_case_timestamps() {
        let note: ImportedNote =
            serde_json::from_str(r#"{"id": "a", "createdAt": 1, "updatedAt": 2}"#).unwrap();
        assert_eq!(note.created_at, Some(1));
        assert_eq!(note.updated_at, Some(2));
    }
}
