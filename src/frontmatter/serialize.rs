//! Frontmatter serialization, the inverse of [`super::parse`].
//!
//! Used by `folio refresh` to rewrite normalized entries in place. Strings
//! are always double-quoted so punctuation and numeric-looking text survive
//! a round trip through the parser's type coercion.

use super::value::{AttributeMap, Value, format_number};

/// Serialize an attribute map back to a `---`-delimited block.
///
/// Lists emit a bare `key:` line followed by `  - item` lines; an empty
/// list emits just the bare `key:` line, which parses back to an empty
/// list. The result has no trailing newline.
pub fn serialize(attributes: &AttributeMap) -> String {
    let mut lines = vec!["---".to_string()];

    for (key, value) in attributes {
        match value {
            Value::List(items) => {
                lines.push(format!("{key}:"));
                for item in items {
                    lines.push(format!("  - {}", format_scalar(item)));
                }
            }
            scalar => lines.push(format!("{key}: {}", format_scalar(scalar))),
        }
    }

    lines.push("---".to_string());
    lines.join("\n")
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => quote(s),
        // Lists never nest in this grammar; flatten defensively via Display
        Value::List(_) => quote(&value.to_string()),
    }
}

/// Double-quote with JSON-style escaping for the characters that would
/// break the line-oriented grammar.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
