//! HTTP client construction.
//!
//! Every request carries the same User-Agent and Accept headers and is
//! bounded by a fixed timeout. There are no retries.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};

/// Request timeout applied to every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Options for constructing an HTTP client.
#[derive(Debug)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpClientOptions {
    /// Options with the default timeout.
    pub fn new(app_version: impl Into<String>) -> Self {
        Self {
            app_version: app_version.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Build a reqwest client with default configuration.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(&format!("ghp/{}", opts.app_version))?,
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );

    tracing::debug!(timeout = ?opts.timeout, "building HTTP client");

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(opts.timeout)
        .build()?;

    Ok(client)
}

/// Format an authorization header value from a token.
pub fn auth_header_value(token: &str) -> String {
    format!("bearer {token}")
}
