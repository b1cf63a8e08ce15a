//! Import of backup documents.
//!
//! The import path never touches a store: it reads a document, validates
//! it, and returns notes plus a summary. Adopting those notes (a wholesale
//! replace) is the backup service's decision, which is also what makes a
//! dry run possible with the same code path.

use crate::io::formats::{create_backup_source, Format};
use crate::io::traits::BackupSource;
use crate::io::validation::{BackupValidator, ValidationReport};
use crate::models::Note;
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Summary of a completed (or dry-run) import.
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Number of notes produced from the document.
    pub notes: usize,
    /// Non-fatal issues found during validation.
    pub warnings: Vec<String>,
}

/// Reads, validates, and converts backup documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportService {
    validator: BackupValidator,
}

impl ImportService {
    /// Creates an import service.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validator: BackupValidator::new(),
        }
    }

    /// Imports a backup file.
    ///
    /// The format comes from the file extension; extensionless files are
    /// treated as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the file cannot be opened, read, or
    /// parsed, or if the document fails validation. Returns `InvalidInput`
    /// for export-only formats.
    pub fn import_from_file(&self, path: &Path) -> Result<(Vec<Note>, ImportSummary)> {
        let format = Format::from_path(path).unwrap_or_default();
        if !format.supports_import() {
            return Err(Error::InvalidInput(format!(
                "{format} does not support import"
            )));
        }

        let file = File::open(path).map_err(|e| Error::ValidationError {
            reason: format!("cannot open {}: {e}", path.display()),
        })?;

        self.import_from_reader(format, Box::new(file))
    }

    /// Imports a backup document from a reader.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if reading, parsing, or validation fails,
    /// or `InvalidInput` for export-only formats.
    pub fn import_from_reader(
        &self,
        format: Format,
        reader: Box<dyn Read>,
    ) -> Result<(Vec<Note>, ImportSummary)> {
        self.import_from_source(create_backup_source(format, reader)?.as_mut())
    }

    /// Imports a backup document from a source.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the document cannot be read or fails
    /// validation.
    pub fn import_from_source(
        &self,
        source: &mut dyn BackupSource,
    ) -> Result<(Vec<Note>, ImportSummary)> {
        let document = source.read_document()?;

        let report = self.validator.validate(&document);
        if let Some(reason) = report.first_error() {
            return Err(Error::ValidationError {
                reason: reason.to_string(),
            });
        }
        for warning in report.warnings() {
            tracing::warn!("import: {warning}");
        }

        let notes = self.validator.to_notes(document);
        let summary = ImportSummary {
            notes: notes.len(),
            warnings: report.warnings(),
        };
        Ok((notes, summary))
    }

    /// Validates a backup file without producing notes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the file cannot be read or parsed,
    /// or `InvalidInput` for export-only formats. Validation findings are
    /// returned in the report, not as errors.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport> {
        let format = Format::from_path(path).unwrap_or_default();
        if !format.supports_import() {
            return Err(Error::InvalidInput(format!(
                "{format} does not support import"
            )));
        }

        let file = File::open(path).map_err(|e| Error::ValidationError {
            reason: format!("cannot open {}: {e}", path.display()),
        })?;

        let mut source = create_backup_source(format, Box::new(file))?;
        let document = source.read_document()?;
        Ok(self.validator.validate(&document))
    }
}
