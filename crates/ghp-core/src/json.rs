//! JSON output helpers.
//!
//! `--format json` prints one compact JSON document on a single line so it
//! can be piped straight into `jq`.

use serde::Serialize;

/// Serialize a value as a single-line JSON document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use ghp_core::json::to_json_line;
///
/// let line = to_json_line(&json!({"title": "Roadmap", "number": 1})).unwrap();
/// assert_eq!(line, r#"{"number":1,"title":"Roadmap"}"#);
/// ```
pub fn to_json_line<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string(value).map_err(|e| anyhow::anyhow!("failed to serialize JSON: {e}"))
}

/// Turn a human-readable name into a JSON key by lower-casing its first
/// character. `"Status"` becomes `"status"`, `"Due Date"` becomes `"due Date"`.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
