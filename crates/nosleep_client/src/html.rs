//! crates/nosleep_client/src/html.rs
//!
//! Best-effort extraction of a readable message from an HTML error page, as served
//! by gateways and hosting platforms in front of the relay. Not a parser.

use regex::Regex;
use std::sync::LazyLock;

/// Tried in order; the first pattern that matches wins.
const FRAGMENT_PATTERNS: [&str; 3] = [
    r"(?s)<pre>(.*?)</pre>",
    r"(?s)<h1>(.*?)</h1>",
    r"(?s)<body>(.*?)</body>",
];

static FRAGMENT_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FRAGMENT_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// True when the body looks like an HTML document rather than JSON or plain text.
pub fn looks_like_html(body: &str) -> bool {
    body.contains("<html") || body.to_ascii_lowercase().contains("<!doctype html>")
}

/// Returns the trimmed contents of the first `<pre>`, `<h1>` or `<body>` element found.
pub fn extract_fragment(body: &str) -> Option<String> {
    FRAGMENT_REGEXES.iter().find_map(|re| {
        re.captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}
