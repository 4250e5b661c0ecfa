//! Configuration system.
//!
//! Reads the same `config.yml` and `hosts.yml` files the official `gh` CLI
//! keeps, so an existing `gh auth login` is picked up as-is.

mod file_config;
mod memory_config;

use std::path::PathBuf;

pub use file_config::FileConfig;
pub use memory_config::MemoryConfig;

/// Configuration directory path (usually ~/.config/gh).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GH_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("gh")
        },
        |d| d.join("gh"),
    )
}

/// Configuration trait for accessing settings.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get a config value, checking hostname scope first then global.
    fn get(&self, hostname: &str, key: &str) -> Option<String>;

    /// Get the browser preference.
    fn browser(&self, hostname: &str) -> Option<String> {
        self.get(hostname, "browser")
    }

    /// Get authentication configuration.
    fn authentication(&self) -> &dyn AuthConfig;
}

/// Authentication configuration trait.
pub trait AuthConfig: Send + Sync + std::fmt::Debug {
    /// Get the active token for a hostname. Returns (token, source).
    fn active_token(&self, hostname: &str) -> Option<(String, String)>;
}

/// Environment variables that carry a token for `hostname`, in lookup order.
pub fn token_env_vars(hostname: &str) -> &'static [&'static str] {
    if crate::instance::is_github_com(hostname) {
        &["GH_TOKEN", "GITHUB_TOKEN"]
    } else {
        &["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    }
}
