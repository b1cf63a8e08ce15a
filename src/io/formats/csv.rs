//! CSV export, one row per note.

use crate::io::traits::ExportSink;
use crate::models::Note;
use crate::{Error, Result};
use std::io::Write;

const HEADERS: [&str; 5] = ["id", "title", "content", "createdAt", "updatedAt"];

/// Writes notes as CSV rows with a header line.
///
/// Export-only; the row form loses the document wrapper (timestamp and
/// version), so CSV files cannot be imported back.
pub struct CsvExportSink {
    writer: csv::Writer<Box<dyn Write>>,
    header_written: bool,
}

impl CsvExportSink {
    /// Creates a sink writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADERS)
            .map_err(|e| csv_error("write csv header", &e))
    }
}

impl ExportSink for CsvExportSink {
    fn write(&mut self, note: &Note) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }

        self.writer
            .write_record([
                note.id.as_str(),
                &note.title,
                &note.content,
                &note.created_at.to_string(),
                &note.updated_at.to_string(),
            ])
            .map_err(|e| csv_error("write csv row", &e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        // An export of zero notes still gets the header line.
        if !self.header_written {
            self.write_header()?;
        }
        self.writer
            .flush()
            .map_err(|e| csv_error("flush csv", &e))
    }
}

fn csv_error(operation: &str, cause: &dyn std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: cause.to_string(),
    }
}
