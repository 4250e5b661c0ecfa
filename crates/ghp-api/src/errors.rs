//! API error types.

/// Errors from talking to the GraphQL API.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// GraphQL errors returned in the response body.
    #[error("GraphQL: {}", format_entries(.0))]
    GraphQL(Vec<GraphQLErrorEntry>),

    /// No token is configured for the host.
    #[error(
        "authentication required for {hostname}: set GH_TOKEN or run `gh auth login --scopes project`"
    )]
    AuthRequired {
        /// Host that needs a token.
        hostname: String,
    },

    /// The API returned null for an owner, project, or resource.
    #[error("{0}")]
    NotFound(String),

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse API response: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// A single GraphQL error entry.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GraphQLErrorEntry {
    /// Error message.
    pub message: String,
    /// Error type (if provided).
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Path to the field that caused the error.
    pub path: Option<Vec<serde_json::Value>>,
}

fn format_entries(entries: &[GraphQLErrorEntry]) -> String {
    entries
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Check if this is a missing owner/project/resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::GraphQL(entries) => entries
                .iter()
                .any(|e| e.error_type.as_deref() == Some("NOT_FOUND")),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, error_type: Option<&str>) -> GraphQLErrorEntry {
        GraphQLErrorEntry {
            message: message.to_string(),
            error_type: error_type.map(str::to_string),
            path: None,
        }
    }

    #[test]
    fn test_should_display_http_error() {
        let err = ApiError::Http {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_should_join_graphql_messages() {
        let err = ApiError::GraphQL(vec![
            entry("Could not resolve to a ProjectV2 with the number 9.", Some("NOT_FOUND")),
            entry("Something else", None),
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL: Could not resolve to a ProjectV2 with the number 9.; Something else"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_should_classify_not_found() {
        let err = ApiError::NotFound("project 3 not found for octocat".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "project 3 not found for octocat");
    }

    #[test]
    fn test_should_name_host_in_auth_error() {
        let err = ApiError::AuthRequired {
            hostname: "ghe.example.com".to_string(),
        };
        assert!(err.to_string().contains("ghe.example.com"));
    }

    #[test]
    fn test_should_deserialize_graphql_error_entry() {
        let json = r#"{"message": "test error", "type": "NOT_FOUND", "path": ["user"]}"#;
        let entry: GraphQLErrorEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.message, "test error");
        assert_eq!(entry.error_type.as_deref(), Some("NOT_FOUND"));
        assert!(entry.path.is_some());
    }
}
