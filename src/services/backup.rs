//! Backup and restore over the note store.
//!
//! Local backup writes a date-stamped JSON document into the backup
//! directory. Remote backup is a gated placeholder: it enforces the
//! offline flag and the reachability probe, then reports success without
//! transferring anything, so the gates and the fallback logic are real
//! even though the transport is not.

use crate::io::services::{ExportOptions, ExportService, ImportService, ImportSummary};
use crate::io::validation::ValidationReport;
use crate::io::Format;
use crate::models::backup_file_name;
use crate::services::{ConnectivityProbe, NoteStore, SettingsStore};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// How a backup request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// The collection was empty; nothing was written.
    NothingToBackUp,
    /// A local file was written.
    Local {
        /// Where the backup file landed.
        path: PathBuf,
        /// Number of notes backed up.
        notes: usize,
    },
    /// The remote path accepted the backup.
    Remote {
        /// Number of notes backed up.
        notes: usize,
    },
}

/// Backup and restore service over a note store.
pub struct BackupService {
    backup_dir: PathBuf,
    export: ExportService,
    import: ImportService,
}

impl BackupService {
    /// Creates a service writing local backups into `backup_dir`.
    #[must_use]
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            export: ExportService::new(),
            import: ImportService::new(),
        }
    }

    /// Writes a date-stamped backup file into the backup directory.
    ///
    /// An empty collection is an informational no-op; nothing is written.
    /// A second export on the same day overwrites the first.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or the file
    /// cannot be written.
    pub fn export_local(&self, store: &NoteStore) -> Result<BackupOutcome> {
        let count = store.count()?;
        if count == 0 {
            tracing::info!("collection is empty, nothing to back up");
            return Ok(BackupOutcome::NothingToBackUp);
        }

        let path = self.backup_dir.join(backup_file_name());
        let options = ExportOptions::new(&path).with_format(Format::Json);
        let result = self.export.export_to_file(store, &options)?;

        Ok(BackupOutcome::Local {
            path: result.path,
            notes: result.notes,
        })
    }

    /// Runs the remote backup path.
    ///
    /// The empty-collection check comes first, before either gate. The
    /// offline flag is checked before the probe, so with the flag set the
    /// network is never touched. Passing both gates yields a placeholder
    /// success; no transfer happens yet.
    ///
    /// # Errors
    ///
    /// Returns `OfflineModeActive` if the offline flag is set, `NoNetwork`
    /// if the probe reports unreachable, or an error if the collection
    /// cannot be read.
    pub fn export_remote(
        &self,
        store: &NoteStore,
        settings: &SettingsStore,
        probe: &ConnectivityProbe,
    ) -> Result<BackupOutcome> {
        let count = store.count()?;
        if count == 0 {
            tracing::info!("collection is empty, nothing to back up");
            return Ok(BackupOutcome::NothingToBackUp);
        }

        if settings.offline_mode() {
            return Err(Error::OfflineModeActive);
        }
        if !probe.is_online(settings) {
            return Err(Error::NoNetwork);
        }

        tracing::info!(notes = count, "remote backup accepted");
        Ok(BackupOutcome::Remote { notes: count })
    }

    /// Backs up remotely when possible, locally otherwise.
    ///
    /// The remote gates refusing (offline flag set, or no network) is not
    /// a failure here; it just selects the local path. Real failures on
    /// either path still propagate.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected path fails.
    pub fn create_backup(
        &self,
        store: &NoteStore,
        settings: &SettingsStore,
        probe: &ConnectivityProbe,
    ) -> Result<BackupOutcome> {
        match self.export_remote(store, settings, probe) {
            Err(Error::OfflineModeActive | Error::NoNetwork) => {
                tracing::info!("remote backup unavailable, falling back to local");
                self.export_local(store)
            },
            other => other,
        }
    }

    /// Restores the collection from a backup file.
    ///
    /// Validation happens before any mutation; a rejected document leaves
    /// the store untouched. On success the previous collection is
    /// discarded wholesale.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the file cannot be read or the
    /// document is rejected, or an error if persisting fails.
    pub fn import_file(&self, store: &mut NoteStore, path: &Path) -> Result<ImportSummary> {
        let (notes, summary) = self.import.import_from_file(path)?;
        store.replace_all(notes)?;

        tracing::info!(path = %path.display(), notes = summary.notes, "backup restored");
        Ok(summary)
    }

    /// Validates a backup file without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the file cannot be read or parsed.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport> {
        self.import.validate_file(path)
    }
}
