//! Desktop bootstrap configuration loaded from build-time generated JSON.

use serde::{Deserialize, Serialize};

use marknote_core::config::StoreConfig;

/// Build-provisioned client configuration embedded into desktop binaries.
///
/// The Firestore web API key identifies the project; it is not a secret, but
/// it stays out of the repository and is injected at build time.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DesktopBootstrapConfig {
    #[serde(default)]
    pub firebase_api_key: Option<String>,
}

impl std::fmt::Debug for DesktopBootstrapConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DesktopBootstrapConfig")
            .field(
                "firebase_api_key",
                &self.firebase_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Loads the generated desktop bootstrap JSON from `OUT_DIR`.
///
/// If parsing fails, this logs a warning and returns a default empty config so
/// the app can continue running in local-only mode.
pub fn load_bootstrap_config() -> DesktopBootstrapConfig {
    let raw = include_str!(concat!(env!("OUT_DIR"), "/desktop-bootstrap.json"));
    parse_bootstrap_config(raw)
}

fn parse_bootstrap_config(raw: &str) -> DesktopBootstrapConfig {
    serde_json::from_str(raw).unwrap_or_else(|error| {
        tracing::warn!("Failed to parse desktop bootstrap config: {}", error);
        DesktopBootstrapConfig::default()
    })
}

/// Resolve the remote store config: runtime environment first, then the key
/// embedded at build time. `None` means local-only mode.
pub fn resolve_store_config(bootstrap: DesktopBootstrapConfig) -> Option<StoreConfig> {
    match StoreConfig::from_env_or(bootstrap.firebase_api_key) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Invalid remote store configuration: {}", error);
            None
        }
    }
}
