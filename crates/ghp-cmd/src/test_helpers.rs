//! Shared test utilities for command testing.
//!
//! Provides a factory wired to a wiremock server, GraphQL mock helpers,
//! and response fixtures for owners, projects, fields, and items.

use std::sync::Arc;

use ghp_core::browser::StubBrowser;
use ghp_core::config::MemoryConfig;
use ghp_core::iostreams::TestOutput;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::factory::Factory;

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API requests.
    pub server: MockServer,
    /// Stub browser for verifying opened URLs.
    pub browser: Arc<StubBrowser>,
}

impl TestHarness {
    /// Create a new test harness pointed at a fresh mock server.
    pub async fn new() -> Self {
        Self::with_config(MemoryConfig::new().with_host("github.com", "ghp_test_token_123"))
            .await
    }

    /// Create a test harness with a custom `MemoryConfig`.
    pub async fn with_config(config: MemoryConfig) -> Self {
        let server = MockServer::start().await;
        let (factory, output) = Factory::test();
        let (factory, browser) = factory.with_stub_browser();
        let factory = factory
            .with_host("github.com")
            .with_http_client(reqwest::Client::new())
            .with_api_url(format!("{}/", server.uri()))
            .with_token("ghp_test_token_123")
            .with_config(Box::new(config));

        Self {
            factory,
            output,
            server,
            browser,
        }
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }

    /// Get URLs opened in the stub browser.
    pub fn opened_urls(&self) -> Vec<String> {
        self.browser
            .urls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of requests the mock server has seen.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

// --- Wiremock helpers ---

/// Mount a GraphQL response mock that matches a query substring.
///
/// # Example
///
/// ```ignore
/// mock_graphql(&harness.server, "UserOwner", json!({
///     "data": { "owner": { "id": "U_1", "login": "monalisa" } }
/// })).await;
/// ```
pub async fn mock_graphql(server: &MockServer, query_contains: &str, response_body: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(query_contains))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
        .mount(server)
        .await;
}

/// Mount the owner lookup for a user, an organization, or the viewer.
pub async fn mock_owner(server: &MockServer, operation: &str, id: &str, login: &str) {
    mock_graphql(
        server,
        operation,
        json!({"data": {"owner": {"id": id, "login": login}}}),
    )
    .await;
}

/// Mount a project lookup answering with `project`.
pub async fn mock_project(server: &MockServer, operation: &str, project: Value) {
    mock_graphql(
        server,
        operation,
        json!({"data": {"owner": {"project": project}}}),
    )
    .await;
}

/// Mount a mutation answering with `node`.
pub async fn mock_mutation(server: &MockServer, operation: &str, node: Value) {
    mock_graphql(server, operation, json!({"data": {"result": {"node": node}}})).await;
}

// --- Common GraphQL response fixtures ---

/// A project node with empty item and field connections.
pub fn project_fixture(number: u32, title: &str) -> Value {
    json!({
        "id": format!("PVT_{number}"),
        "number": number,
        "title": title,
        "url": format!("https://github.com/orgs/github/projects/{number}"),
        "shortDescription": "",
        "readme": null,
        "public": false,
        "closed": false,
        "owner": {"__typename": "Organization", "login": "github"},
        "items": {"totalCount": 0, "nodes": []},
        "fields": {"totalCount": 0, "nodes": []}
    })
}

/// An item node linked to an issue in `cli/cli`.
pub fn item_fixture(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "isArchived": false,
        "content": {
            "__typename": "Issue",
            "title": title,
            "body": "",
            "number": 1,
            "url": "https://github.com/cli/cli/issues/1",
            "repository": {"nameWithOwner": "cli/cli"}
        },
        "fieldValues": {"totalCount": 0, "nodes": []}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghp_core::ios_println;

    #[tokio::test]
    async fn test_should_create_test_harness() {
        let h = TestHarness::new().await;
        assert!(h.stdout().is_empty());
        assert!(h.stderr().is_empty());
        assert!(h.opened_urls().is_empty());
        assert_eq!(h.request_count().await, 0);
    }

    #[tokio::test]
    async fn test_should_capture_output_through_factory() {
        let h = TestHarness::new().await;
        ios_println!(h.factory.io, "hello from test");
        assert_eq!(h.stdout(), "hello from test\n");
    }

    #[tokio::test]
    async fn test_should_record_browser_opens() {
        let h = TestHarness::new().await;
        h.factory.browser().open("https://example.com").unwrap();
        assert_eq!(h.opened_urls(), vec!["https://example.com"]);
    }

    #[tokio::test]
    async fn test_should_route_client_to_mock_server() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "ViewerOwner", "U_1", "monalisa").await;

        let client = h.factory.api_client().unwrap();
        let result: Value = client
            .graphql(ghp_api::queries::owner::VIEWER_OWNER_QUERY, &std::collections::HashMap::new())
            .await
            .unwrap();

        assert_eq!(result["owner"]["login"], "monalisa");
        assert_eq!(h.request_count().await, 1);
    }
}
