//! Export of the note collection to files and writers.

use crate::io::formats::{create_export_sink, Format};
use crate::services::NoteStore;
use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for an export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Where the exported file goes.
    pub path: PathBuf,
    /// Output format; inferred from the path extension when `None`.
    pub format: Option<Format>,
}

impl ExportOptions {
    /// Creates options targeting the given path, format inferred.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    /// Pins the output format explicitly.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Resolves the effective format: explicit choice, then extension,
    /// then JSON.
    #[must_use]
    pub fn resolve_format(&self) -> Format {
        self.format
            .or_else(|| Format::from_path(&self.path))
            .unwrap_or_default()
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Where the file was written.
    pub path: PathBuf,
    /// The format that was written.
    pub format: Format,
    /// Number of notes exported.
    pub notes: usize,
}

/// Exports the note collection through format sinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportService;

impl ExportService {
    /// Creates an export service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Exports all notes to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read, the file cannot
    /// be created, or writing fails.
    pub fn export_to_file(&self, store: &NoteStore, options: &ExportOptions) -> Result<ExportResult> {
        let format = options.resolve_format();

        let file = File::create(&options.path).map_err(|e| Error::OperationFailed {
            operation: format!("create {}", options.path.display()),
            cause: e.to_string(),
        })?;

        let notes = self.export_to_writer(store, format, Box::new(file))?;

        tracing::info!(
            path = %options.path.display(),
            %format,
            notes,
            "collection exported"
        );
        Ok(ExportResult {
            path: options.path.clone(),
            format,
            notes,
        })
    }

    /// Exports all notes to a writer; returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or writing fails.
    pub fn export_to_writer(
        &self,
        store: &NoteStore,
        format: Format,
        writer: Box<dyn Write>,
    ) -> Result<usize> {
        let notes = store.list()?;
        let mut sink = create_export_sink(format, writer);

        for note in &notes {
            sink.write(note)?;
        }
        sink.finalize()?;
        Ok(notes.len())
    }
}

/// Returns `path` if it names a file, or `path/{file_name}` if it names a
/// directory, so callers can pass either a target file or a target folder.
#[must_use]
pub fn resolve_target(path: &Path, file_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(file_name)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::BackupDocument;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn store_with_notes() -> NoteStore {
        let mut store = NoteStore::new(Box::new(MemoryStore::new()));
        store.create("A", "alpha").unwrap();
        store.create("B", "beta").unwrap();
        store
    }

    #[test]
    fn test_export_json_file() {
        let dir = TempDir::new().unwrap();
        let store = store_with_notes();
        let options = ExportOptions::new(dir.path().join("backup.json"));

        let result = ExportService::new().export_to_file(&store, &options).unwrap();
        assert_eq!(result.notes, 2);
        assert_eq!(result.format, Format::Json);

        let raw = std::fs::read_to_string(&result.path).unwrap();
        let doc: BackupDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.data[0].title, "B");
    }

    #[test]
    fn test_export_format_inferred_from_extension() {
        let dir = TempDir::new().unwrap();
        let store = store_with_notes();
        let options = ExportOptions::new(dir.path().join("notes.csv"));

        let result = ExportService::new().export_to_file(&store, &options).unwrap();
        assert_eq!(result.format, Format::Csv);

        let raw = std::fs::read_to_string(&result.path).unwrap();
        assert!(raw.starts_with("id,title,content"));
    }

    #[test]
    fn test_explicit_format_wins_over_extension() {
        let options =
            ExportOptions::new("notes.csv").with_format(Format::Markdown);
        assert_eq!(options.resolve_format(), Format::Markdown);
    }

    #[test]
    fn test_unknown_extension_defaults_json() {
        assert_eq!(ExportOptions::new("notes.bak").resolve_format(), Format::Json);
    }

    #[test]
    fn test_export_unwritable_path_fails() {
        let store = store_with_notes();
        let options = ExportOptions::new("/nonexistent-dir/backup.json");
        assert!(ExportService::new().export_to_file(&store, &options).is_err());
    }

    #[test]
    fn test_resolve_target() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_target(dir.path(), "b.json"),
            dir.path().join("b.json")
        );

        let file = dir.path().join("explicit.json");
        assert_eq!(resolve_target(&file, "b.json"), file);
    }
}
