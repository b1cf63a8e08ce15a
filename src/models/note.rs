//! Note types and identifiers.

use crate::current_timestamp_ms;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a note ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh unique ID.
    ///
    /// UUID v7 combines a millisecond time component with randomness, so ids
    /// are unique without coordination and sort roughly by creation time.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single note: a title/content pair with creation and update timestamps.
///
/// The JSON wire form uses camelCase keys (`createdAt`, `updatedAt`) to stay
/// compatible with existing stored collections and backup files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, assigned at creation, immutable thereafter.
    pub id: NoteId,
    /// Display title.
    pub title: String,
    /// Free-form body, may be empty.
    pub content: String,
    /// Creation timestamp (Unix epoch milliseconds), set once.
    pub created_at: i64,
    /// Last update timestamp (Unix epoch milliseconds).
    ///
    /// Always `>= created_at`; refreshed on every successful update.
    pub updated_at: i64,
}

impl Note {
    /// Creates a new note with a fresh id and the current time as both
    /// creation and update timestamp.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = current_timestamp_ms();
        Self {
            id: NoteId::generate(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the note matches a case-insensitive substring query
    /// against its title or content.
    #[must_use]
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.content.to_lowercase().contains(query_lower)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_timestamps_equal() {
        let note = Note::new("Title", "content");
        assert_eq!(note.created_at, note.updated_at);
        assert!(note.created_at > 0);
    }

    #[test]
    fn test_generated_ids_unique() {
        let a = NoteId::generate();
        let b = NoteId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_camel_case() {
        let note = Note {
            id: NoteId::new("n1"),
            title: "A".to_string(),
            content: "x".to_string(),
            created_at: 1,
            updated_at: 2,
        };
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"createdAt\":1"));
        assert!(json.contains("\"updatedAt\":2"));

        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn test_matches_case_insensitive() {
        let note = Note::new("Shopping List", "Buy MILK");
        assert!(note.matches("shopping"));
        assert!(note.matches("milk"));
        assert!(!note.matches("cheese"));
    }
}
