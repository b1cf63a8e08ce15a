//! Format adapters for import and export.
//!
//! JSON is the backup interchange format and the only one that can be
//! imported. CSV and Markdown are export-only conveniences.

pub mod csv;
pub mod json;
pub mod markdown;

use super::traits::{BackupSource, ExportSink};
use crate::{Error, Result};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

pub use csv::CsvExportSink;
pub use json::{JsonBackupSink, JsonBackupSource};
pub use markdown::MarkdownExportSink;

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// JSON backup document (import and export).
    #[default]
    Json,
    /// CSV table (export only).
    Csv,
    /// Markdown document (export only).
    Markdown,
}

impl Format {
    /// Returns the canonical file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    /// Infers the format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Returns whether documents in this format can be imported.
    #[must_use]
    pub const fn supports_import(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Returns whether notes can be exported in this format.
    #[must_use]
    pub const fn supports_export(self) -> bool {
        true
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(Error::InvalidInput(format!("unknown format: {other}"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Creates a backup source reading the given format.
///
/// # Errors
///
/// Returns `InvalidInput` for formats without import support.
pub fn create_backup_source(
    format: Format,
    reader: Box<dyn Read>,
) -> Result<Box<dyn BackupSource>> {
    match format {
        Format::Json => Ok(Box::new(JsonBackupSource::new(reader))),
        Format::Csv | Format::Markdown => Err(Error::InvalidInput(format!(
            "{format} does not support import"
        ))),
    }
}

/// Creates an export sink writing the given format.
#[must_use]
pub fn create_export_sink(format: Format, writer: Box<dyn Write>) -> Box<dyn ExportSink> {
    match format {
        Format::Json => Box::new(JsonBackupSink::new(writer)),
        Format::Csv => Box::new(CsvExportSink::new(writer)),
        Format::Markdown => Box::new(MarkdownExportSink::new(writer)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("json", Format::Json)]
    #[test_case("JSON", Format::Json ; "json_uppercase")]
    #[test_case("csv", Format::Csv)]
    #[test_case("md", Format::Markdown)]
    #[test_case("markdown", Format::Markdown)]
    fn test_format_from_str(input: &str, expected: Format) {
        assert_eq!(input.parse::<Format>().unwrap(), expected);
    }

    #[test]
    fn test_format_from_str_unknown() {
        assert!("xml".parse::<Format>().is_err());
    }

    #[test_case("backup.json", Some(Format::Json))]
    #[test_case("notes.CSV", Some(Format::Csv))]
    #[test_case("notes.markdown", Some(Format::Markdown))]
    #[test_case("notes.txt", None)]
    #[test_case("noext", None)]
    fn test_format_from_path(path: &str, expected: Option<Format>) {
        assert_eq!(Format::from_path(Path::new(path)), expected);
    }

    #[test]
    fn test_only_json_supports_import() {
        assert!(Format::Json.supports_import());
        assert!(!Format::Csv.supports_import());
        assert!(!Format::Markdown.supports_import());
    }

    #[test]
    fn test_create_backup_source_rejects_export_only_formats() {
        let result = create_backup_source(Format::Csv, Box::new(std::io::empty()));
        assert!(result.is_err());
    }
}
