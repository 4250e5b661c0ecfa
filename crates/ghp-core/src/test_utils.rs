//! Test-only helpers for the core crate.

/// RAII guard for environment variables in tests.
///
/// Restores the original value (or removes the variable) when dropped.
/// Tests that touch the same variable should do so from a single test
/// function, since the environment is shared across test threads.
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable for the lifetime of the guard.
    pub fn set(key: &str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    /// Remove an environment variable for the lifetime of the guard.
    pub fn unset(key: &str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &str, value: Option<&str>) -> Self {
        let original = std::env::var(key).ok();
        apply(key, value);
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        apply(&self.key, self.original.as_deref());
    }
}

fn apply(key: &str, value: Option<&str>) {
    // SAFETY: only called from tests; each variable is owned by one test.
    unsafe {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}
