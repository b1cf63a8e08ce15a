//! High-level export and import services.

pub mod export;
pub mod import;

pub use export::{ExportOptions, ExportResult, ExportService};
pub use import::{ImportService, ImportSummary};
