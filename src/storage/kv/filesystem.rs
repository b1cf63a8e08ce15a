//! Filesystem-based key/value backend.
//!
//! The default backend: one file per key under a data directory.
//!
//! # Security
//!
//! This module includes protections against filesystem-based attacks:
//! - **Path traversal**: keys are validated to prevent directory escape
//! - **File size limits**: a maximum value size is enforced on read
//!
//! # Atomicity
//!
//! Writes go to a temporary sibling file and are then renamed over the
//! target, so a crash mid-write never leaves a torn value behind.

use crate::storage::traits::KeyValueStore;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum size for a stored value (4MB).
/// Prevents memory exhaustion from maliciously large files.
const MAX_VALUE_SIZE: u64 = 4 * 1024 * 1024;

/// File extension for stored values.
const VALUE_EXT: &str = "dat";

/// Filesystem-based key/value backend.
pub struct FileStore {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a new filesystem backend.
    ///
    /// Attempts to create the directory; failures surface on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let path = base_path.into();
        let _ = fs::create_dir_all(&path);
        Self { base_path: path }
    }

    /// Creates a new filesystem backend with checked directory creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).map_err(|e| Error::OperationFailed {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self { base_path })
    }

    /// Returns the file path for a key.
    ///
    /// # Security
    ///
    /// The key is sanitized to prevent path traversal attacks. Only
    /// alphanumeric characters, dashes, and underscores are allowed.
    fn value_path(&self, key: &str) -> Result<PathBuf> {
        if !Self::is_safe_key(key) {
            return Err(Error::InvalidInput(format!(
                "storage key contains invalid characters: {key}",
            )));
        }

        let path = self.base_path.join(format!("{key}.{VALUE_EXT}"));

        // Double-check: ensure the resulting path is under base_path.
        // The is_safe_key check is the primary barrier; this catches
        // anything it might miss without requiring the file to exist.
        if !path.starts_with(&self.base_path) {
            return Err(Error::InvalidInput(format!(
                "path traversal attempt detected for key: {key}",
            )));
        }

        Ok(path)
    }

    /// Checks if a key is safe to use as a filename (no path traversal).
    fn is_safe_key(key: &str) -> bool {
        !key.is_empty()
            && key.len() <= 255
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = match self.value_path(key) {
            Ok(p) => p,
            Err(_) => return Ok(None), // Invalid key means no value
        };

        if !path.exists() {
            return Ok(None);
        }

        // Validate file size before reading to prevent memory exhaustion
        let metadata = fs::metadata(&path).map_err(|e| Error::OperationFailed {
            operation: "read_file_metadata".to_string(),
            cause: e.to_string(),
        })?;

        if metadata.len() > MAX_VALUE_SIZE {
            return Err(Error::InvalidInput(format!(
                "stored value exceeds maximum size of {MAX_VALUE_SIZE} bytes: {}",
                path.display()
            )));
        }

        let value = fs::read_to_string(&path).map_err(|e| Error::OperationFailed {
            operation: "read_value_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Ensure directory exists before storing
        let _ = fs::create_dir_all(&self.base_path);

        let path = self.value_path(key)?;

        // Write to a temp sibling, then rename. Rename within one directory
        // is atomic, so readers see either the old value or the new one.
        let tmp_path = self.base_path.join(format!("{key}.{VALUE_EXT}.tmp"));
        fs::write(&tmp_path, value).map_err(|e| Error::OperationFailed {
            operation: "write_value_file".to_string(),
            cause: e.to_string(),
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| Error::OperationFailed {
            operation: "commit_value_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = match self.value_path(key) {
            Ok(p) => p,
            Err(_) => return Ok(false), // Invalid key means nothing to remove
        };

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| Error::OperationFailed {
            operation: "remove_value_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        if !self.base_path.exists() {
            return Ok(keys);
        }

        let entries = fs::read_dir(&self.base_path).map_err(|e| Error::OperationFailed {
            operation: "read_storage_dir".to_string(),
            cause: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::OperationFailed {
                operation: "read_dir_entry".to_string(),
                cause: e.to_string(),
            })?;

            if let Some(key) = extract_key_from_path(&entry.path()) {
                keys.push(key);
            }
        }

        Ok(keys)
    }
}

/// Extracts a storage key from a value file path.
fn extract_key_from_path(path: &Path) -> Option<String> {
    if path.extension().is_none_or(|ext| ext != VALUE_EXT) {
        return None;
    }

    let stem = path.file_stem()?;
    Some(stem.to_str()?.to_string())
}
