//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of configuration, the API client, and the
//! browser. Tests inject an HTTP client, a mock server URL, a token, an
//! in-memory config, and a stub browser.

use std::sync::{Arc, Mutex, OnceLock};

use ghp_api::client::Client;
use ghp_api::http::{HttpClientOptions, build_client};
use ghp_core::browser::{Browser, StubBrowser, SystemBrowser};
use ghp_core::config::{Config, FileConfig};
use ghp_core::instance;
use ghp_core::iostreams::{IOStreams, TestOutput};
use secrecy::SecretString;

/// Shared factory providing lazily-initialized dependencies to all commands.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    /// Configuration (lazily loaded).
    config: OnceLock<Mutex<Box<dyn Config>>>,

    // Test overrides
    host_override: Option<String>,
    http_override: Option<reqwest::Client>,
    api_url_override: Option<String>,
    token_override: Option<SecretString>,
    browser_stub: Option<Arc<StubBrowser>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("host_override", &self.host_override)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version.
    pub fn new(app_version: String) -> Self {
        Self::with_io(app_version, IOStreams::system())
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();
        (Self::with_io("test".to_string(), io), output)
    }

    fn with_io(app_version: String, io: IOStreams) -> Self {
        Self {
            app_version,
            io,
            config: OnceLock::new(),
            host_override: None,
            http_override: None,
            api_url_override: None,
            token_override: None,
            browser_stub: None,
        }
    }

    /// Pin the host instead of reading `GH_HOST`.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host_override = Some(instance::normalize_hostname(&host.into()));
        self
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Set an API URL override (wiremock server URI with trailing slash).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Set a test auth token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token_override = Some(SecretString::from(token.into()));
        self
    }

    /// Set a config override for testing.
    #[must_use]
    pub fn with_config(self, config: Box<dyn Config>) -> Self {
        let _ = self.config.set(Mutex::new(config));
        self
    }

    /// Set a stub browser and return the shared reference for verification.
    pub fn with_stub_browser(mut self) -> (Self, Arc<StubBrowser>) {
        let stub = Arc::new(StubBrowser::default());
        self.browser_stub = Some(stub.clone());
        (self, stub)
    }

    /// Host every command talks to.
    pub fn host(&self) -> String {
        self.host_override
            .clone()
            .unwrap_or_else(instance::default_host)
    }

    /// Get the configuration, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded.
    pub fn config(&self) -> anyhow::Result<&Mutex<Box<dyn Config>>> {
        if let Some(cfg) = self.config.get() {
            return Ok(cfg);
        }
        let cfg = FileConfig::load()?;
        let boxed: Box<dyn Config> = Box::new(cfg);
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(Mutex::new(boxed));
        self.config
            .get()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))
    }

    /// Create a browser instance.
    ///
    /// In test mode with a stub browser, returns the stub.
    pub fn browser(&self) -> Box<dyn Browser> {
        if let Some(ref stub) = self.browser_stub {
            return Box::new(StubBrowserWrapper(stub.clone()));
        }
        let host = self.host();
        let configured = self
            .config()
            .ok()
            .and_then(|c| c.lock().ok()?.browser(&host));
        Box::new(SystemBrowser::resolve(configured))
    }

    /// Build an API client for the configured host.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn api_client(&self) -> anyhow::Result<Client> {
        let hostname = self.host();
        let http = if let Some(ref client) = self.http_override {
            client.clone()
        } else {
            build_client(&HttpClientOptions::new(self.app_version.clone()))?
        };

        let token: Option<SecretString> = self.token_override.clone().or_else(|| {
            self.config().ok().and_then(|c| {
                let cfg = c.lock().ok()?;
                let (token, source) = cfg.authentication().active_token(&hostname)?;
                tracing::debug!(host = %hostname, source = %source, "using token");
                Some(SecretString::from(token))
            })
        });

        let mut client = Client::new(http, &hostname, token);
        if let Some(ref url) = self.api_url_override {
            client = client.with_url_override(url.clone());
        }
        Ok(client)
    }
}

/// Wrapper to use `Arc<StubBrowser>` as `Box<dyn Browser>`.
#[derive(Debug)]
struct StubBrowserWrapper(Arc<StubBrowser>);

impl Browser for StubBrowserWrapper {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        self.0.open(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghp_core::config::MemoryConfig;

    #[test]
    fn test_should_use_pinned_host() {
        let (factory, _) = Factory::test();
        let factory = factory.with_host("https://GHE.example.com/");
        assert_eq!(factory.host(), "ghe.example.com");
        assert_eq!(factory.api_client().unwrap().hostname(), "ghe.example.com");
    }

    #[test]
    fn test_should_prefer_injected_config() {
        let (factory, _) = Factory::test();
        let factory = factory
            .with_host("github.com")
            .with_config(Box::new(MemoryConfig::new().with_setting("browser", "lynx")));
        let cfg = factory.config().unwrap().lock().unwrap();
        assert_eq!(cfg.browser("github.com"), Some("lynx".to_string()));
    }
}
