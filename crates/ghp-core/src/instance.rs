//! GitHub instance handling for github.com and Enterprise Server hosts.

/// Known GitHub cloud hostname.
pub const GITHUB_COM: &str = "github.com";

/// GitHub localhost for development.
const LOCALHOST: &str = "github.localhost";

/// Normalize a GitHub hostname by removing protocol and trailing slashes.
pub fn normalize_hostname(host: &str) -> String {
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);

    host.trim_end_matches('/').to_lowercase()
}

/// Check if a hostname is a GitHub.com cloud instance.
pub fn is_github_com(host: &str) -> bool {
    let normalized = normalize_hostname(host);
    normalized == GITHUB_COM || normalized == LOCALHOST
}

/// Host to talk to: `GH_HOST` when set, otherwise github.com.
pub fn default_host() -> String {
    std::env::var("GH_HOST")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .map_or_else(|| GITHUB_COM.to_string(), |h| normalize_hostname(&h))
}

/// Get the GraphQL API endpoint for a given hostname.
pub fn graphql_url(host: &str) -> String {
    let normalized = normalize_hostname(host);
    if is_github_com(&normalized) {
        "https://api.github.com/graphql".to_string()
    } else {
        format!("https://{normalized}/api/graphql")
    }
}

/// Get the HTTPS URL prefix for a hostname (e.g., `https://github.com/`).
pub fn host_prefix(host: &str) -> String {
    format!("https://{}/", normalize_hostname(host))
}
