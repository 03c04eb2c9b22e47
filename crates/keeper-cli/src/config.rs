//! Persisted CLI configuration.
//!
//! The only setting is the service base URL, stored as JSON under the
//! platform config directory. `--url` and the `KEEPER_URL` environment
//! variable override it, in that order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use keeper_core::ServiceUrl;

/// Stored configuration.
#[derive(Debug, Serialize, Deserialize)]
struct StoredConfig {
    service_url: String,
}

/// Get the config file path.
fn config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "keeper").context("Could not determine config directory")?;

    let config_dir = dirs.config_dir();
    fs::create_dir_all(config_dir).context("Failed to create config directory")?;

    Ok(config_dir.join("config.json"))
}

/// Persist the service URL.
pub fn save_service_url(url: &ServiceUrl) -> Result<()> {
    save_to(&config_path()?, url)
}

fn save_to(path: &Path, url: &ServiceUrl) -> Result<()> {
    let stored = StoredConfig {
        service_url: url.to_string(),
    };
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(path, &json).context("Failed to write config file")?;
    Ok(())
}

fn load_from(path: &Path) -> Result<Option<ServiceUrl>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read config file")?;
    let stored: StoredConfig = serde_json::from_str(&json).context("Invalid config file")?;
    let url = ServiceUrl::new(&stored.service_url).context("Invalid service URL in config")?;

    Ok(Some(url))
}

/// Resolve the service URL from `--url`, then `KEEPER_URL`, then the
/// config file.
pub fn resolve_service_url(flag: Option<&str>) -> Result<ServiceUrl> {
    if let Some(url) = flag {
        return ServiceUrl::new(url).context("Invalid --url value");
    }

    if let Ok(url) = std::env::var("KEEPER_URL") {
        tracing::debug!("Using service URL from KEEPER_URL");
        return ServiceUrl::new(&url).context("Invalid KEEPER_URL value");
    }

    load_from(&config_path()?)?
        .context("No service configured. Run 'keeper connect <url>' first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let url = ServiceUrl::new("https://records.example.com/api/").unwrap();
        save_to(&path, &url).unwrap();

        let loaded = load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, url);
    }

    #[test]
    fn missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("config.json")).unwrap().is_none());
    }

    #[test]
    fn invalid_url_in_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"service_url": "ftp://nope"}"#).unwrap();

        assert!(load_from(&path).is_err());
    }
}
