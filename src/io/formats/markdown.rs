//! Markdown export, a human-readable rendering of the collection.

use crate::io::traits::ExportSink;
use crate::models::Note;
use crate::{Error, Result};
use chrono::{Local, TimeZone};
use std::io::Write;

/// Writes notes as a Markdown document.
///
/// Export-only; Markdown is for reading and sharing, not for restoring.
pub struct MarkdownExportSink {
    writer: Box<dyn Write>,
    notes_written: usize,
}

impl MarkdownExportSink {
    /// Creates a sink writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            notes_written: 0,
        }
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::OperationFailed {
                operation: "write markdown".to_string(),
                cause: e.to_string(),
            })
    }
}

impl ExportSink for MarkdownExportSink {
    fn write(&mut self, note: &Note) -> Result<()> {
        if self.notes_written == 0 {
            self.emit("# Notes\n")?;
        }

        let section = format!(
            "\n## {}\n\n{}\n\n*Last updated: {}*\n",
            note.title,
            note.content,
            format_date(note.updated_at)
        );
        self.emit(&section)?;
        self.notes_written += 1;
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        if self.notes_written == 0 {
            self.emit("# Notes\n\n_No notes._\n")?;
        }
        self.writer.flush().map_err(|e| Error::OperationFailed {
            operation: "flush markdown".to_string(),
            cause: e.to_string(),
        })
    }
}

fn format_date(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| timestamp_ms.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn export(notes: &[Note]) -> String {
        let buf = SharedBuf::default();
        let mut sink: Box<dyn ExportSink> =
            Box::new(MarkdownExportSink::new(Box::new(buf.clone())));
        for note in notes {
            sink.write(note).unwrap();
        }
        sink.finalize().unwrap();
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_notes_become_sections() {
        let md = export(&[Note::new("Groceries", "milk"), Note::new("Ideas", "none yet")]);

        assert!(md.starts_with("# Notes\n"));
        assert!(md.contains("## Groceries"));
        assert!(md.contains("milk"));
        assert!(md.contains("## Ideas"));
        assert!(md.contains("*Last updated: "));
    }

    #[test]
    fn test_empty_export_has_placeholder() {
        let md = export(&[]);
        assert!(md.contains("_No notes._"));
    }
}
