//! In-memory configuration for testing.

use std::collections::HashMap;

use super::{AuthConfig, Config};

/// In-memory configuration for testing.
///
/// Stores all settings in `HashMap`s. No disk I/O is performed and the
/// environment is never consulted.
///
/// # Examples
///
/// ```
/// use ghp_core::config::{Config, MemoryConfig};
///
/// let config = MemoryConfig::new()
///     .with_host("github.com", "ghp_token123");
///
/// let auth = config.authentication();
/// let (token, source) = auth.active_token("github.com").unwrap();
/// assert_eq!(token, "ghp_token123");
/// assert_eq!(source, "config");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfig {
    global: HashMap<String, String>,
    /// hostname -> token
    auth: HashMap<String, String>,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an authenticated host with the given token.
    #[must_use]
    pub fn with_host(mut self, hostname: &str, token: &str) -> Self {
        self.auth.insert(hostname.to_string(), token.to_string());
        self
    }

    /// Set a global configuration value.
    #[must_use]
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.global.insert(key.to_string(), value.to_string());
        self
    }
}

impl Config for MemoryConfig {
    fn get(&self, _hostname: &str, key: &str) -> Option<String> {
        self.global.get(key).cloned()
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }
}

impl AuthConfig for MemoryConfig {
    fn active_token(&self, hostname: &str) -> Option<(String, String)> {
        let token = self.auth.get(hostname)?;
        Some((token.clone(), "config".to_string()))
    }
}
