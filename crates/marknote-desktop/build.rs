use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// Names checked for the Firestore web API key, in priority order.
const API_KEY_VARS: [&str; 2] = ["MARKNOTE_FIREBASE_API_KEY", "FIREBASE_API_KEY"];

#[derive(Debug, Default, Serialize)]
struct DesktopBootstrapConfig {
    firebase_api_key: Option<String>,
}

fn main() {
    for name in API_KEY_VARS {
        println!("cargo:rerun-if-env-changed={name}");
    }

    if let Err(error) = write_desktop_bootstrap_config() {
        println!("cargo:warning=failed to generate desktop bootstrap config: {error}");
    }
}

fn write_desktop_bootstrap_config() -> io::Result<()> {
    load_workspace_dotenv();

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = DesktopBootstrapConfig {
        firebase_api_key: API_KEY_VARS.iter().find_map(|name| env_var_trimmed(name)),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("desktop-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let candidate = manifest_dir.join("..").join("..").join(".env");
    if candidate.exists() {
        println!("cargo:rerun-if-changed={}", candidate.display());
        let _ = dotenvy::from_path(candidate);
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
