//! Configuration types for the Discovery Engine client.

use std::time::Duration;

/// Host serving the `global` location.
pub const GLOBAL_HOST: &str = "discoveryengine.googleapis.com";

/// Default delay before the first operation status check, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Default upper bound on the delay between status checks, in milliseconds.
pub const DEFAULT_MAX_POLL_INTERVAL_MS: u64 = 30_000;

/// Smallest accepted poll delay. A zero delay would never grow when doubled.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for the DiscoveryEngineClient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryEngineConfig {
    /// Base URL of the API, without a trailing slash.
    pub endpoint: String,
    /// Delay before the first status check of a pending operation.
    pub poll_interval: Duration,
    /// The delay doubles after each check up to this bound.
    pub max_poll_interval: Duration,
}

impl DiscoveryEngineConfig {
    /// Create a config targeting the API host serving `location`.
    ///
    /// `global` is served by the bare host; every other location has its own
    /// regional host.
    pub fn for_location(location: &str) -> Self {
        let endpoint = if location == "global" {
            format!("https://{}", GLOBAL_HOST)
        } else {
            format!("https://{}-{}", location, GLOBAL_HOST)
        };

        Self {
            endpoint,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_poll_interval: Duration::from_millis(DEFAULT_MAX_POLL_INTERVAL_MS),
        }
    }

    /// Use a custom endpoint (emulators, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Use custom polling delays.
    ///
    /// `initial` is raised to [`MIN_POLL_INTERVAL`] and `max` to `initial`.
    pub fn with_poll_interval(mut self, initial: Duration, max: Duration) -> Self {
        let initial = initial.max(MIN_POLL_INTERVAL);
        self.poll_interval = initial;
        self.max_poll_interval = max.max(initial);
        self
    }
}
