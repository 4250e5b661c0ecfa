//! Browser integration for `--web` flags.

/// Trait for opening URLs in a browser.
pub trait Browser: Send + Sync + std::fmt::Debug {
    /// Open a URL in the user's browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be opened.
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// System browser implementation using the `open` crate.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    launcher: Option<String>,
}

impl SystemBrowser {
    /// Pick a launcher from `GH_BROWSER`, then `BROWSER`, then the configured
    /// value, falling back to the platform default.
    pub fn resolve(configured: Option<String>) -> Self {
        let launcher = ["GH_BROWSER", "BROWSER"]
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .or(configured)
            .filter(|l| !l.trim().is_empty());
        Self { launcher }
    }

    /// The launcher command, if one was chosen.
    pub fn launcher(&self) -> Option<&str> {
        self.launcher.as_deref()
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        tracing::debug!(url, launcher = ?self.launcher, "opening browser");
        let Some(launcher) = &self.launcher else {
            open::that(url)?;
            return Ok(());
        };

        let parts = shlex::split(launcher).unwrap_or_else(|| vec![launcher.clone()]);
        match parts.split_first() {
            Some((program, args)) => {
                std::process::Command::new(program)
                    .args(args)
                    .arg(url)
                    .spawn()?;
            }
            None => open::that(url)?,
        }
        Ok(())
    }
}

/// Stub browser for testing that records URLs instead of opening them.
#[derive(Debug, Default)]
pub struct StubBrowser {
    /// URLs that were "opened".
    pub urls: std::sync::Mutex<Vec<String>>,
}

impl Browser for StubBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        let mut urls = self
            .urls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        urls.push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::EnvVarGuard;

    #[test]
    fn test_should_record_urls_in_stub() {
        let browser = StubBrowser::default();
        browser
            .open("https://github.com/orgs/github/projects/1")
            .unwrap();

        let urls = browser.urls.lock().unwrap();
        assert_eq!(*urls, vec!["https://github.com/orgs/github/projects/1"]);
    }

    #[test]
    fn test_should_resolve_launcher_from_env_then_config() {
        let _browser = EnvVarGuard::unset("BROWSER");
        {
            let _gh = EnvVarGuard::set("GH_BROWSER", "firefox --new-tab");
            let browser = SystemBrowser::resolve(Some("chromium".to_string()));
            assert_eq!(browser.launcher(), Some("firefox --new-tab"));
        }

        let _gh = EnvVarGuard::unset("GH_BROWSER");
        let browser = SystemBrowser::resolve(Some("chromium".to_string()));
        assert_eq!(browser.launcher(), Some("chromium"));

        let blank = SystemBrowser::resolve(Some("  ".to_string()));
        assert!(blank.launcher().is_none());
    }
}
