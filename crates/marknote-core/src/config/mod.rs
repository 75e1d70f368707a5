//! Remote store configuration.
//!
//! The only external credential is the Firestore web API key. Project and
//! collection addressing is fixed at build time.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::util::normalize_text_option;
use crate::{Error, Result};

/// Firestore project holding the notes collection.
pub const DEFAULT_PROJECT_ID: &str = "react-notes-99c00";
/// Collection every note document lives in.
pub const DEFAULT_COLLECTION: &str = "notes";
/// Base URL of the Firestore REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://firestore.googleapis.com/v1";

const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["MARKNOTE_FIREBASE_API_KEY", "FIREBASE_API_KEY"];
const POLL_INTERVAL_VAR: &str = "MARKNOTE_POLL_INTERVAL_MS";

#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_key: String,
    pub project_id: String,
    pub collection: String,
    pub api_base_url: String,
    /// How often subscriptions re-list the collection.
    pub poll_interval: Duration,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StoreConfig")
            .field("api_key", &"[REDACTED]")
            .field("project_id", &self.project_id)
            .field("collection", &self.collection)
            .field("api_base_url", &self.api_base_url)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl StoreConfig {
    /// Config for the built-in project with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = normalize_text_option(Some(api_key.into()))
            .ok_or_else(|| Error::Config("API key must not be empty".to_string()))?;
        Ok(Self {
            api_key,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        })
    }

    /// Read the config from the process environment.
    ///
    /// Returns `Ok(None)` when no API key is set so callers can fall back to a
    /// local-only store.
    pub fn from_env() -> Result<Option<Self>> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    /// Like [`Self::from_env`], with `fallback_api_key` used when the
    /// environment does not provide one (e.g. a key embedded at build time).
    pub fn from_env_or(fallback_api_key: Option<String>) -> Result<Option<Self>> {
        match Self::from_env()? {
            Some(config) => Ok(Some(config)),
            None => normalize_text_option(fallback_api_key)
                .map(Self::new)
                .transpose(),
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let Some(api_key) = API_KEY_VARS
            .iter()
            .find_map(|name| normalize_text_option(lookup(name)))
        else {
            return Ok(None);
        };

        let mut config = Self::new(api_key)?;
        if let Some(raw) = normalize_text_option(lookup(POLL_INTERVAL_VAR)) {
            config.poll_interval = parse_poll_interval(&raw)?;
        }
        Ok(Some(config))
    }

    /// URL of the notes collection.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.api_base_url.trim_end_matches('/'),
            self.project_id,
            self.collection
        )
    }

    /// URL of a single note document.
    pub fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

fn parse_poll_interval(raw: &str) -> Result<Duration> {
    let millis: u64 = raw.parse().map_err(|_| {
        Error::Config(format!(
            "{POLL_INTERVAL_VAR} must be a whole number of milliseconds"
        ))
    })?;
    if millis < MIN_POLL_INTERVAL_MS {
        return Err(Error::Config(format!(
            "{POLL_INTERVAL_VAR} must be at least {MIN_POLL_INTERVAL_MS}"
        )));
    }
    Ok(Duration::from_millis(millis))
}
