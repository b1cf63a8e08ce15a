//! Service layer: the note store, settings, connectivity, and backup.

pub mod backup;
pub mod connectivity;
pub mod notes;
pub mod settings;

pub use backup::{BackupOutcome, BackupService};
pub use connectivity::{ConnectivityProbe, HttpReachability, ReachabilityCheck};
pub use notes::NoteStore;
pub use settings::{SettingsStore, Theme};
