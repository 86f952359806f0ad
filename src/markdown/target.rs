//! Image/link target parsing: `path/to/img.png "A caption"`.

use std::sync::LazyLock;

use regex::Regex;

/// `url` optionally followed by a double-quoted title.
static RE_URL_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\S+)(?:\s+"(.*)")?$"#).unwrap());

/// Split a Markdown image/link target into `(url, title)`.
///
/// The title is the trailing double-quoted segment when the whole target
/// matches that shape; otherwise the first whitespace run splits url from a
/// best-effort title. Empty input yields two empty strings.
pub fn parse_image_target(target: &str) -> (String, String) {
    let trimmed = target.trim();

    if let Some(caps) = RE_URL_TITLE.captures(trimmed) {
        let url = caps[1].to_string();
        let title = caps.get(2).map_or_else(String::new, |m| m.as_str().to_string());
        return (url, title);
    }

    // Fallback: no well-formed quoted title; split on first whitespace run
    let mut parts = trimmed.split_whitespace();
    let url = parts.next().unwrap_or("").to_string();
    let title = parts.collect::<Vec<_>>().join(" ");
    (url, title)
}
