//! JSON backup format, the interchange format for import and export.

use crate::io::traits::{BackupSource, ExportSink, ImportedBackup};
use crate::models::{BackupDocument, Note};
use crate::{Error, Result};
use std::io::{Read, Write};

/// Reads one JSON backup document from a reader.
pub struct JsonBackupSource {
    reader: Box<dyn Read>,
}

impl JsonBackupSource {
    /// Creates a source reading from the given reader.
    #[must_use]
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl BackupSource for JsonBackupSource {
    fn read_document(&mut self) -> Result<ImportedBackup> {
        let mut raw = String::new();
        self.reader
            .read_to_string(&mut raw)
            .map_err(|e| Error::ValidationError {
                reason: format!("cannot read backup: {e}"),
            })?;

        serde_json::from_str(&raw).map_err(|e| Error::ValidationError {
            reason: format!("not a valid JSON backup: {e}"),
        })
    }
}

/// Writes notes as a complete JSON backup document.
///
/// Notes are collected until `finalize()`, which wraps them in a
/// [`BackupDocument`] and writes the whole thing pretty-printed. Nothing
/// reaches the writer before finalization.
pub struct JsonBackupSink {
    writer: Box<dyn Write>,
    notes: Vec<Note>,
}

impl JsonBackupSink {
    /// Creates a sink writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            notes: Vec::new(),
        }
    }
}

impl ExportSink for JsonBackupSink {
    fn write(&mut self, note: &Note) -> Result<()> {
        self.notes.push(note.clone());
        Ok(())
    }

    fn finalize(self: Box<Self>) -> Result<()> {
        let mut writer = self.writer;
        let document = BackupDocument::new(self.notes);

        let json = serde_json::to_string_pretty(&document).map_err(|e| Error::OperationFailed {
            operation: "serialize backup".to_string(),
            cause: e.to_string(),
        })?;

        writer
            .write_all(json.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| Error::OperationFailed {
                operation: "write backup".to_string(),
                cause: e.to_string(),
            })
    }
}
