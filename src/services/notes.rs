//! The note store.
//!
//! Sole authority for reading and mutating the note collection. The whole
//! collection lives as one JSON array under [`NOTES_KEY`]; every mutation
//! is a read-modify-write of the entire collection followed by a single
//! backend write, so no partial state is ever observable.
//!
//! Reads are fail-soft: a missing payload is an empty collection, and an
//! unparseable payload is treated as empty with a warning rather than an
//! error. Corruption must never take the collection hostage.

use crate::models::{EventMeta, Note, NoteId, StoreEvent};
use crate::observability::ChangeBus;
use crate::storage::{KeyValueStore, NOTES_KEY};
use crate::{current_timestamp_ms, Error, Result};
use tokio::sync::broadcast;

/// Key/value-backed store for the note collection.
pub struct NoteStore {
    kv: Box<dyn KeyValueStore>,
    bus: ChangeBus,
}

impl NoteStore {
    /// Creates a store over the given backend.
    #[must_use]
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            bus: ChangeBus::default(),
        }
    }

    /// Returns all notes, most recently created first.
    ///
    /// Updates do not reorder: only creation inserts at the front, so the
    /// order is insertion order. A corrupt payload yields an empty list
    /// and a warning.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend read itself fails.
    pub fn list(&self) -> Result<Vec<Note>> {
        let Some(raw) = self.kv.get(NOTES_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(notes) => Ok(notes),
            Err(e) => {
                let err = Error::StorageCorrupt {
                    cause: e.to_string(),
                };
                tracing::warn!("{err}; treating collection as empty");
                Ok(Vec::new())
            },
        }
    }

    /// Returns the note with the given id, or `None`.
    ///
    /// Absence is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get(&self, id: &NoteId) -> Result<Option<Note>> {
        Ok(self.list()?.into_iter().find(|n| &n.id == id))
    }

    /// Creates a note and inserts it at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the title is empty or whitespace-only,
    /// or an error if persisting fails.
    pub fn create(&mut self, title: &str, content: &str) -> Result<Note> {
        validate_title(title)?;

        let note = Note::new(title, content);
        let mut notes = self.list()?;
        notes.insert(0, note.clone());
        self.persist(&notes)?;

        tracing::debug!(id = %note.id, "note created");
        self.bus.publish(StoreEvent::NoteCreated {
            meta: EventMeta::new(NOTES_KEY),
            note_id: note.id.clone(),
        });
        Ok(note)
    }

    /// Replaces the title and content of an existing note.
    ///
    /// The note keeps its id, creation timestamp, and position in the
    /// collection. The update timestamp becomes strictly greater than its
    /// previous value even when the clock has not advanced.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no note has the id, `InvalidInput` for an
    /// empty title, or an error if persisting fails.
    pub fn update(&mut self, id: &NoteId, title: &str, content: &str) -> Result<Note> {
        validate_title(title)?;

        let mut notes = self.list()?;
        let Some(note) = notes.iter_mut().find(|n| &n.id == id) else {
            return Err(Error::NotFound {
                id: id.to_string(),
            });
        };

        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = current_timestamp_ms().max(note.updated_at + 1);
        let updated = note.clone();

        self.persist(&notes)?;

        tracing::debug!(id = %updated.id, "note updated");
        self.bus.publish(StoreEvent::NoteUpdated {
            meta: EventMeta::new(NOTES_KEY),
            note_id: updated.id.clone(),
        });
        Ok(updated)
    }

    /// Removes the note with the given id if present.
    ///
    /// The resulting collection is persisted whether or not a removal
    /// occurred. Returns whether a note was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn delete(&mut self, id: &NoteId) -> Result<bool> {
        let mut notes = self.list()?;
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        let removed = notes.len() < before;

        self.persist(&notes)?;

        if removed {
            tracing::debug!(id = %id, "note deleted");
            self.bus.publish(StoreEvent::NoteDeleted {
                meta: EventMeta::new(NOTES_KEY),
                note_id: id.clone(),
            });
        }
        Ok(removed)
    }

    /// Case-insensitive substring search over title and content.
    ///
    /// An empty or whitespace-only query returns the full list. Results
    /// keep the collection's natural order; there is no relevance ranking.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn search(&self, query: &str) -> Result<Vec<Note>> {
        let notes = self.list()?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(notes);
        }

        let query_lower = query.to_lowercase();
        Ok(notes
            .into_iter()
            .filter(|n| n.matches(&query_lower))
            .collect())
    }

    /// Replaces the entire collection.
    ///
    /// Used by restore: the previous collection is discarded wholesale,
    /// with no merging.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn replace_all(&mut self, notes: Vec<Note>) -> Result<()> {
        self.persist(&notes)?;

        tracing::debug!(count = notes.len(), "collection replaced");
        self.bus.publish(StoreEvent::CollectionReplaced {
            meta: EventMeta::new(NOTES_KEY),
            count: notes.len(),
        });
        Ok(())
    }

    /// Returns the number of stored notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    /// Subscribes to change events.
    ///
    /// An event means the in-memory view is stale and the collection
    /// should be reloaded; events never carry note payloads.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    /// Serializes and writes the whole collection as one backend write.
    fn persist(&mut self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes).map_err(|e| Error::OperationFailed {
            operation: "serialize_notes".to_string(),
            cause: e.to_string(),
        })?;
        self.kv.set(NOTES_KEY, &raw)
    }
}

/// Rejects empty and whitespace-only titles.
fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("title is required".to_string()));
    }
    Ok(())
}
