//! Change events for the note collection.
//!
//! Every successful mutation publishes one of these so other consumers of
//! the same storage can discard their in-memory view and reload. Events are
//! a notification, not a data channel: they carry the changed storage key
//! and enough identity to log, never the note payload.

use super::NoteId;
use crate::current_timestamp_ms;
use uuid::Uuid;

/// Shared event metadata.
#[derive(Debug, Clone)]
pub struct EventMeta {
    /// Unique identifier for this event.
    pub event_id: String,
    /// The storage key whose value changed.
    pub key: &'static str,
    /// Timestamp (Unix epoch milliseconds).
    pub timestamp: i64,
}

impl EventMeta {
    /// Creates new event metadata using the current timestamp.
    #[must_use]
    pub fn new(key: &'static str) -> Self {
        Self::with_timestamp(key, current_timestamp_ms())
    }

    /// Creates new event metadata with a specified timestamp.
    #[must_use]
    pub fn with_timestamp(key: &'static str, timestamp: i64) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            key,
            timestamp,
        }
    }
}

/// Events emitted after the note collection is persisted.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A note was created.
    NoteCreated {
        /// Event metadata.
        meta: EventMeta,
        /// The id of the new note.
        note_id: NoteId,
    },
    /// A note was updated in place.
    NoteUpdated {
        /// Event metadata.
        meta: EventMeta,
        /// The id of the updated note.
        note_id: NoteId,
    },
    /// A note was removed.
    NoteDeleted {
        /// Event metadata.
        meta: EventMeta,
        /// The id of the removed note.
        note_id: NoteId,
    },
    /// The whole collection was replaced (restore from backup).
    CollectionReplaced {
        /// Event metadata.
        meta: EventMeta,
        /// Number of notes in the new collection.
        count: usize,
    },
}

impl StoreEvent {
    /// Returns the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::NoteCreated { .. } => "created",
            Self::NoteUpdated { .. } => "updated",
            Self::NoteDeleted { .. } => "deleted",
            Self::CollectionReplaced { .. } => "replaced",
        }
    }

    /// Returns the storage key the event refers to.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.meta().key
    }

    /// Returns the timestamp of the event.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.meta().timestamp
    }

    /// Returns the event metadata.
    #[must_use]
    pub const fn meta(&self) -> &EventMeta {
        match self {
            Self::NoteCreated { meta, .. }
            | Self::NoteUpdated { meta, .. }
            | Self::NoteDeleted { meta, .. }
            | Self::CollectionReplaced { meta, .. } => meta,
        }
    }
}
