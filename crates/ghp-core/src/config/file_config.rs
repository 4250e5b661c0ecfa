//! File-based configuration implementation.
//!
//! Reads config.yml and hosts.yml in the gh config directory. Nothing is
//! ever written back; authentication is managed by `gh auth login`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{AuthConfig, Config, config_dir, token_env_vars};
use crate::errors::ConfigError;

/// File-based configuration backed by YAML files.
#[derive(Debug, Default)]
pub struct FileConfig {
    global: ConfigData,
    hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigData {
    #[serde(default)]
    browser: Option<String>,
    #[serde(default)]
    hosts: HashMap<String, HostSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct HostSettings {
    #[serde(default)]
    browser: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HostConfig {
    #[serde(default)]
    oauth_token: Option<String>,
}

impl FileConfig {
    /// Load configuration from the default config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_dir())
    }

    /// Load configuration from an explicit directory. Missing files are
    /// treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let global: ConfigData = read_yaml(&dir.join("config.yml"))?.unwrap_or_default();
        let hosts: HashMap<String, HostConfig> =
            read_yaml(&dir.join("hosts.yml"))?.unwrap_or_default();
        tracing::debug!(dir = %dir.display(), hosts = hosts.len(), "loaded config");
        Ok(Self { global, hosts })
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

impl Config for FileConfig {
    fn get(&self, hostname: &str, key: &str) -> Option<String> {
        if key != "browser" {
            return None;
        }
        if !hostname.is_empty()
            && let Some(val) = self
                .global
                .hosts
                .get(hostname)
                .and_then(|h| h.browser.clone())
        {
            return Some(val);
        }
        self.global.browser.clone()
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }
}

impl AuthConfig for FileConfig {
    fn active_token(&self, hostname: &str) -> Option<(String, String)> {
        for key in token_env_vars(hostname) {
            if let Ok(token) = std::env::var(key)
                && !token.is_empty()
            {
                return Some((token, (*key).to_string()));
            }
        }

        let token = self.hosts.get(hostname)?.oauth_token.as_ref()?;
        Some((token.clone(), "config".to_string()))
    }
}
