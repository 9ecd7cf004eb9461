//! Process-wide settings read from the environment.

use std::env;
use std::time::Duration;

use import_trigger_repository::config::{DEFAULT_MAX_POLL_INTERVAL_MS, DEFAULT_POLL_INTERVAL_MS};
use import_trigger_shared::BranchPath;

use crate::AppError;

/// Default HTTP port, as used by Cloud Run and Cloud Functions.
const DEFAULT_PORT: u16 = 8080;

/// Settings of one trigger process. Read once at startup and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_id: String,
    pub location: String,
    pub data_store_id: String,
    pub port: u16,
    /// Overrides the API endpoint derived from `location`.
    pub endpoint: Option<String>,
    /// Static bearer token; the metadata server is used when unset.
    pub access_token: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_interval: Duration,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PROJECT_ID`, `LOCATION`, `DATASTORE_ID`: target datastore (required)
    /// - `PORT`: HTTP port (default: 8080)
    /// - `DISCOVERY_ENGINE_ENDPOINT`: API endpoint override
    /// - `GOOGLE_OAUTH_ACCESS_TOKEN`: static access token
    /// - `OPERATION_POLL_INTERVAL_MS`: first operation poll delay (default: 2000)
    /// - `OPERATION_MAX_POLL_INTERVAL_MS`: poll delay cap (default: 30000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required =
            |key: &str| var(key).ok_or_else(|| AppError::config(format!("{} must be set", key)));

        Ok(Self {
            project_id: required("PROJECT_ID")?,
            location: required("LOCATION")?,
            data_store_id: required("DATASTORE_ID")?,
            port: parse_or(var("PORT"), "PORT", DEFAULT_PORT)?,
            endpoint: var("DISCOVERY_ENGINE_ENDPOINT"),
            access_token: var("GOOGLE_OAUTH_ACCESS_TOKEN"),
            poll_interval: Duration::from_millis(parse_or(
                var("OPERATION_POLL_INTERVAL_MS"),
                "OPERATION_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )?),
            max_poll_interval: Duration::from_millis(parse_or(
                var("OPERATION_MAX_POLL_INTERVAL_MS"),
                "OPERATION_MAX_POLL_INTERVAL_MS",
                DEFAULT_MAX_POLL_INTERVAL_MS,
            )?),
        })
    }

    /// The datastore branch imports target.
    pub fn branch(&self) -> BranchPath {
        BranchPath::new(&self.project_id, &self.location, &self.data_store_id)
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
