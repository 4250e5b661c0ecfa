//! Markdown rendering for project READMEs.

use std::sync::LazyLock;

use regex::Regex;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap_or_else(|_| unreachable!()));
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap_or_else(|_| unreachable!()));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap_or_else(|_| unreachable!()));

/// Render markdown text for terminal display.
pub fn render(text: &str, width: usize) -> String {
    let skin = termimad::MadSkin::default();
    let fmt = termimad::FmtText::from(&skin, text, Some(width));
    fmt.to_string()
}

/// Render markdown to plain text for piped output.
///
/// Strips header markers and emphasis, and rewrites links as `text (url)`.
pub fn render_plain(text: &str) -> String {
    let result = HEADER_RE.replace_all(text, "");
    let result = result.replace("**", "").replace("__", "");
    let result = EMPHASIS_RE.replace_all(&result, "$1");
    LINK_RE.replace_all(&result, "$1 ($2)").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_strip_headers_and_emphasis() {
        let plain = render_plain("# Roadmap\n\nShip **v2** by *March*");
        assert_eq!(plain, "Roadmap\n\nShip v2 by March");
    }

    #[test]
    fn test_should_rewrite_links() {
        let plain = render_plain("See [the board](https://github.com/orgs/x/projects/1)");
        assert_eq!(plain, "See the board (https://github.com/orgs/x/projects/1)");
    }

    #[test]
    fn test_should_render_plain_empty_string() {
        assert_eq!(render_plain(""), "");
    }

    #[test]
    fn test_should_render_markdown_for_terminal() {
        let output = render("Hello **world**", 40);
        assert!(output.contains("Hello"));
        assert!(output.contains("world"));
    }
}
