//! Key/value storage trait.

use crate::Result;

/// Trait for key/value storage backends.
///
/// Backends are the authoritative storage for everything the engine
/// persists: the note collection, the offline flag, and the theme
/// preference. Keys and values are both strings; interpretation of a value
/// (JSON or plain text) is the caller's concern.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value for a key. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes the value for a key, replacing any previous value.
    ///
    /// The write must be observable as a single unit: a reader never sees
    /// a partially-written value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes a key, returning whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// Lists all stored keys.
    fn keys(&self) -> Result<Vec<String>>;

    /// Checks whether a key is present.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
