//! Core data types.

mod backup;
mod events;
mod note;

pub use backup::{BACKUP_VERSION, BackupDocument, backup_file_name};
pub use events::{EventMeta, StoreEvent};
pub use note::{Note, NoteId};
