//! Configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Default reachability endpoint for the connectivity probe.
///
/// A lightweight, globally available endpoint; any completed HTTP exchange
/// against it counts as "online".
pub const DEFAULT_PROBE_ENDPOINT: &str = "https://www.cloudflare.com/cdn-cgi/trace";

/// Default probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Which key/value backend to persist with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// One file per key under the data directory.
    #[default]
    Filesystem,
    /// A single `SQLite` database under the data directory.
    Sqlite,
}

impl StorageKind {
    /// Parses a backend name; unknown names fall back to the default.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" | "db" => Self::Sqlite,
            _ => Self::Filesystem,
        }
    }

    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filesystem => "filesystem",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Connectivity probe configuration.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Endpoint the probe issues its reachability request against.
    pub endpoint: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROBE_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

/// Logging settings as read from configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// Log level filter (e.g. `"info"`, `"notecore=debug"`).
    pub level: Option<String>,
    /// Output format: `"pretty"` or `"json"`.
    pub format: Option<String>,
    /// Optional log file path (append mode).
    pub file: Option<PathBuf>,
}

/// Main configuration for notecore.
#[derive(Debug, Clone)]
pub struct NotecoreConfig {
    /// Directory holding persisted state.
    pub data_dir: PathBuf,
    /// Directory local backups are written to.
    pub backup_dir: PathBuf,
    /// Which key/value backend to use.
    pub storage: StorageKind,
    /// Connectivity probe settings.
    pub probe: ProbeConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Backup directory.
    pub backup_dir: Option<String>,
    /// Storage backend name.
    pub storage: Option<String>,
    /// Probe section.
    pub probe: Option<ConfigFileProbe>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Probe section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileProbe {
    /// Reachability endpoint.
    pub endpoint: Option<String>,
    /// Timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// Log level filter.
    pub level: Option<String>,
    /// Output format.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl Default for NotecoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backup_dir: PathBuf::from("."),
            storage: StorageKind::default(),
            probe: ProbeConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Returns the platform data directory for notecore, or `.notecore` when
/// the platform directories cannot be resolved.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "notecore").map_or_else(
        || PathBuf::from(".notecore"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

impl NotecoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/notecore/` on macOS)
    /// 2. XDG config dir (`~/.config/notecore/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("notecore").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("notecore")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `NotecoreConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(backup_dir) = file.backup_dir {
            config.backup_dir = PathBuf::from(backup_dir);
        }
        if let Some(storage) = file.storage {
            config.storage = StorageKind::parse(&storage);
        }
        if let Some(probe) = file.probe {
            if let Some(endpoint) = probe.endpoint {
                config.probe.endpoint = endpoint;
            }
            if let Some(timeout_ms) = probe.timeout_ms {
                config.probe.timeout_ms = timeout_ms;
            }
        }
        if let Some(logging) = file.logging {
            config.logging.level = logging.level;
            config.logging.format = logging.format;
            config.logging.file = logging.file.map(PathBuf::from);
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the backup directory.
    #[must_use]
    pub fn with_backup_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_dir = path.into();
        self
    }

    /// Sets the storage backend.
    #[must_use]
    pub const fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }
}
