//! Connectivity probe.
//!
//! Answers "can we reach the network right now" for the remote-backup
//! gate. The answer is best-effort: `true` means "likely reachable", not a
//! guarantee, since conditions can change between the check and whatever
//! follows it.

use crate::config::NotecoreConfig;
use crate::services::SettingsStore;
use std::time::Duration;

/// Trait for reachability checkers.
///
/// Abstracts the single HTTP request the probe makes, so tests can
/// substitute a recording mock.
pub trait ReachabilityCheck: Send + Sync {
    /// Attempts one request against the endpoint.
    ///
    /// Returns `true` if an HTTP exchange completed, regardless of status
    /// or body (opaque responses count as reachable). Transport errors and
    /// timeouts return `false`.
    fn check(&self, endpoint: &str) -> bool;
}

/// HTTP reachability checker using reqwest.
pub struct HttpReachability {
    /// Blocking client with the probe timeout baked in.
    client: reqwest::blocking::Client,
}

impl HttpReachability {
    /// Creates a checker with the given per-request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("notecore/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self { client }
    }
}

impl ReachabilityCheck for HttpReachability {
    fn check(&self, endpoint: &str) -> bool {
        // Any completed exchange counts, including error statuses.
        match self.client.get(endpoint).send() {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("reachability check failed: {e}");
                false
            },
        }
    }
}

/// Best-effort, timeout-bounded connectivity probe.
pub struct ConnectivityProbe {
    endpoint: String,
    checker: Box<dyn ReachabilityCheck>,
}

impl ConnectivityProbe {
    /// Creates a probe from configuration, using the HTTP checker.
    #[must_use]
    pub fn from_config(config: &NotecoreConfig) -> Self {
        Self {
            endpoint: config.probe.endpoint.clone(),
            checker: Box::new(HttpReachability::new(Duration::from_millis(
                config.probe.timeout_ms,
            ))),
        }
    }

    /// Creates a probe with a custom checker, for tests.
    #[must_use]
    pub fn with_checker(endpoint: impl Into<String>, checker: Box<dyn ReachabilityCheck>) -> Self {
        Self {
            endpoint: endpoint.into(),
            checker,
        }
    }

    /// Returns whether the network is likely reachable.
    ///
    /// When the offline flag is set this returns `false` immediately,
    /// without any network activity. Otherwise one request is attempted
    /// against the configured endpoint.
    #[must_use]
    pub fn is_online(&self, settings: &SettingsStore) -> bool {
        if settings.offline_mode() {
            tracing::debug!("offline mode set, skipping reachability check");
            return false;
        }
        self.checker.check(&self.endpoint)
    }
}

/// Recording mock checker for tests.
#[cfg(test)]
pub struct MockReachability {
    /// The canned answer.
    pub reachable: bool,
    /// Endpoints checked so far.
    pub checked: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockReachability {
    /// Creates a mock returning the given answer.
    pub const fn new(reachable: bool) -> Self {
        Self {
            reachable,
            checked: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl ReachabilityCheck for MockReachability {
    fn check(&self, endpoint: &str) -> bool {
        self.checked
            .lock()
            .expect("lock")
            .push(endpoint.to_string());
        self.reachable
    }
}
