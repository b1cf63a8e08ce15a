//! Backup document validation and defaulting.
//!
//! Validation is deliberately shallow: the document must carry a notes
//! array, and if that array is non-empty its first element must have a
//! non-empty id, title, and content. Elements beyond the first are not
//! inspected; their missing fields are defaulted when the document is
//! converted to notes.

use super::traits::{ImportedBackup, ImportedNote};
use crate::current_timestamp_ms;
use crate::models::{Note, NoteId};

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Warning: issue noted but import can proceed.
    Warning,
    /// Error: the document must be rejected.
    Error,
}

/// A validation issue found in a backup document.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The field that has an issue.
    pub field: String,
    /// Description of the issue.
    pub message: String,
    /// Severity of the issue.
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    /// Creates a warning issue.
    #[must_use]
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }

    /// Creates an error issue.
    #[must_use]
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }
}

/// Result of validating a backup document.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Issues found, warnings and errors alike.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns whether the document may be imported (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    /// Returns the first error message, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| i.severity == ValidationSeverity::Error)
            .map(|i| i.message.as_str())
    }

    /// Returns all warning messages.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Warning)
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect()
    }
}

/// Validates backup documents and converts them to notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackupValidator;

impl BackupValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Shallowly validates a parsed backup document.
    #[must_use]
    pub fn validate(&self, document: &ImportedBackup) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(data) = document.data.as_ref() else {
            report
                .issues
                .push(ValidationIssue::error("data", "missing notes array"));
            return report;
        };

        // An empty array is a valid backup of an empty collection.
        if let Some(first) = data.first() {
            for (field, value) in [
                ("id", &first.id),
                ("title", &first.title),
                ("content", &first.content),
            ] {
                if value.as_deref().is_none_or(str::is_empty) {
                    report.issues.push(ValidationIssue::error(
                        field,
                        format!("first note is missing {field}"),
                    ));
                }
            }
        }

        if document.version.is_none() {
            report
                .issues
                .push(ValidationIssue::warning("version", "version tag missing"));
        }
        if document.timestamp.is_none() {
            report.issues.push(ValidationIssue::warning(
                "timestamp",
                "backup timestamp missing",
            ));
        }

        report
    }

    /// Converts a validated document into notes, defaulting missing fields.
    ///
    /// Elements beyond the first may be partial; they receive a fresh id,
    /// empty strings, and the document timestamp (or the current time) as
    /// needed. Timestamps are clamped so `created_at <= updated_at` holds
    /// for every produced note.
    #[must_use]
    pub fn to_notes(&self, document: ImportedBackup) -> Vec<Note> {
        let fallback_ts = document.timestamp.unwrap_or_else(current_timestamp_ms);

        document
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|imported| Self::to_note(imported, fallback_ts))
            .collect()
    }

    fn to_note(imported: ImportedNote, fallback_ts: i64) -> Note {
        let id = imported
            .id
            .filter(|s| !s.is_empty())
            .map_or_else(NoteId::generate, NoteId::new);

        let created_at = imported.created_at.unwrap_or(fallback_ts);
        let updated_at = imported.updated_at.unwrap_or(created_at).max(created_at);

        Note {
            id,
            title: imported.title.unwrap_or_default(),
            content: imported.content.unwrap_or_default(),
            created_at,
            updated_at,
        }
    }
}
