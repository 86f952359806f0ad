//! HTML entity escaping for rendered fragments.

use std::borrow::Cow;

/// Characters that require escaping in text content.
const ESCAPE_CHARS: [char; 5] = ['&', '<', '>', '"', '\''];

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(&ESCAPE_CHARS[..]) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape an attribute value.
///
/// Deliberately narrower than [`escape`]: only `"` is rewritten. Attribute
/// values here are URLs and language tags, and in the inline pipeline they
/// have already been through [`escape`] once.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains('"') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('"', "&quot;"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("hello world"), "hello world");
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_attr_only_quotes() {
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
        // Narrower than text escaping: everything else passes through
        assert_eq!(escape_attr("a&b<c>'d'"), "a&b<c>'d'");
    }
}
