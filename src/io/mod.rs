//! Import/export of backup documents.
//!
//! Export writes the note collection through a format-specific
//! [`ExportSink`]; import reads a whole backup document through a
//! [`BackupSource`], validates it shallowly, and hands back notes for the
//! store to adopt. Import is JSON-only; CSV and Markdown are export-only.

pub mod formats;
pub mod services;
pub mod traits;
pub mod validation;

pub use formats::Format;
pub use services::{ExportOptions, ExportResult, ExportService, ImportService, ImportSummary};
pub use traits::{BackupSource, ExportSink, ImportedBackup, ImportedNote};
pub use validation::{BackupValidator, ValidationIssue, ValidationReport, ValidationSeverity};
