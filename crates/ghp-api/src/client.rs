//! GraphQL API client.
//!
//! Every request is a single POST to the GraphQL endpoint. Partial
//! responses (data alongside errors) are returned when the data still
//! decodes into the requested shape.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::{ApiError, GraphQLErrorEntry};
use crate::http::auth_header_value;
use ghp_core::instance;

/// GitHub GraphQL client wrapping reqwest with auth and error handling.
///
/// Tokens are stored as [`SecretString`] to prevent accidental logging or
/// exposure through `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    hostname: String,
    token: Option<SecretString>,
    /// Base URL override for testing (e.g., `"http://127.0.0.1:PORT/"`).
    api_url_override: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("hostname", &self.hostname)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client for a specific hostname.
    pub fn new(http: reqwest::Client, hostname: &str, token: Option<SecretString>) -> Self {
        Self {
            http,
            hostname: instance::normalize_hostname(hostname),
            token,
            api_url_override: None,
        }
    }

    /// Route requests to `{url}graphql` instead of the real endpoint.
    /// The URL should include the trailing slash.
    #[must_use]
    pub fn with_url_override(mut self, url: String) -> Self {
        self.api_url_override = Some(url);
        self
    }

    /// Get the hostname this client is configured for.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    fn endpoint(&self) -> String {
        match self.api_url_override {
            Some(ref base) => format!("{base}graphql"),
            None => instance::graphql_url(&self.hostname),
        }
    }

    /// Execute a GraphQL query or mutation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRequired`] without sending anything when no
    /// token is configured. Otherwise returns an error on network failure,
    /// a non-success status, or GraphQL errors with no usable data.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &HashMap<String, Value>,
    ) -> Result<T, ApiError> {
        let Some(ref token) = self.token else {
            return Err(ApiError::AuthRequired {
                hostname: self.hostname.clone(),
            });
        };

        let url = self.endpoint();
        debug!(
            operation = operation_name(query),
            url = %url,
            variables = variables.len(),
            "graphql request"
        );

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let resp = self
            .http
            .post(&url)
            .header("Authorization", auth_header_value(token.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "graphql request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: Value = resp.json().await?;
        decode_response(body)
    }
}

fn decode_response<T: DeserializeOwned>(mut body: Value) -> Result<T, ApiError> {
    let data = body.get_mut("data").map(Value::take);

    if let Some(errors) = body.get("errors") {
        let entries: Vec<GraphQLErrorEntry> =
            serde_json::from_value(errors.clone()).unwrap_or_default();
        if !entries.is_empty() {
            debug!(errors = entries.len(), "graphql response carried errors");
            if let Some(data) = data
                && !data.is_null()
                && let Ok(result) = serde_json::from_value::<T>(data)
            {
                return Ok(result);
            }
            return Err(ApiError::GraphQL(entries));
        }
    }

    let data = data.ok_or_else(|| ApiError::Http {
        status: 200,
        message: "no data in GraphQL response".to_string(),
    })?;

    Ok(serde_json::from_value(data)?)
}

/// Extract the operation name (`query Foo(...)` -> `Foo`) for logging.
fn operation_name(query: &str) -> &str {
    let trimmed = query.trim_start();
    let rest = trimmed
        .strip_prefix("query")
        .or_else(|| trimmed.strip_prefix("mutation"))
        .unwrap_or("");
    rest.trim_start()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .next()
        .unwrap_or("")
}
