//! In-memory key/value backend.
//!
//! Useful for tests and for embedding the engine without durable storage.

use crate::Result;
use crate::storage::traits::KeyValueStore;
use std::collections::HashMap;

/// `HashMap`-backed key/value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.values.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("theme").unwrap());
        assert!(!store.remove("theme").unwrap());
        assert!(store.get("theme").unwrap().is_none());
    }
}
