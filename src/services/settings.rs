//! Persisted user settings: the offline flag and the theme preference.

use crate::storage::{KeyValueStore, OFFLINE_MODE_KEY, THEME_KEY};
use crate::Result;
use std::fmt;

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Parses a theme name; unknown names fall back to light.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key/value-backed settings store.
///
/// Reads are fail-soft: an absent or unreadable value yields the default
/// (offline mode off, light theme) rather than an error.
pub struct SettingsStore {
    kv: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Creates a settings store over the given backend.
    #[must_use]
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Returns whether offline mode is enabled.
    #[must_use]
    pub fn offline_mode(&self) -> bool {
        self.kv
            .get(OFFLINE_MODE_KEY)
            .ok()
            .flatten()
            .is_some_and(|v| v == "true")
    }

    /// Enables or disables offline mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be persisted.
    pub fn set_offline_mode(&mut self, enabled: bool) -> Result<()> {
        self.kv
            .set(OFFLINE_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Returns the theme preference.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.kv
            .get(THEME_KEY)
            .ok()
            .flatten()
            .map_or_else(Theme::default, |v| Theme::parse(&v))
    }

    /// Sets the theme preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.kv.set(THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_offline_mode_defaults_off() {
        let store = SettingsStore::new(Box::new(MemoryStore::new()));
        assert!(!store.offline_mode());
    }

    #[test]
    fn test_offline_mode_roundtrip() {
        let mut store = SettingsStore::new(Box::new(MemoryStore::new()));

        store.set_offline_mode(true).unwrap();
        assert!(store.offline_mode());

        store.set_offline_mode(false).unwrap();
        assert!(!store.offline_mode());
    }

    #[test]
    fn test_offline_mode_garbage_value_is_off() {
        let mut kv = MemoryStore::new();
        kv.set(OFFLINE_MODE_KEY, "maybe").unwrap();

        let store = SettingsStore::new(Box::new(kv));
        assert!(!store.offline_mode());
    }

    #[test]
    fn test_theme_defaults_light() {
        let store = SettingsStore::new(Box::new(MemoryStore::new()));
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_roundtrip() {
        let mut store = SettingsStore::new(Box::new(MemoryStore::new()));

        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("DARK"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
    }
}
