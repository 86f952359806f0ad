//! Frontmatter parsing: `---`-delimited metadata blocks.
//!
//! A document optionally opens with a metadata block:
//!
//! ```text
//! ---
//! title: "A, B: Test"
//! year: 2021
//! tags:
//!   - alpha
//!   - beta
//! ---
//! Body text here.
//! ```
//!
//! [`parse`] splits the document into `(AttributeMap, body)` and decodes the
//! block with a restricted YAML-like grammar: flat `key: value` scalars,
//! `- item` lists under an empty-valued key, quoted multi-line scalars, and
//! soft line-wrap continuation. No anchors, no nesting, no multi-document
//! streams. The parser is total — malformed input degrades to strings or is
//! ignored, it never fails.

mod scalar;
mod serialize;
mod value;

pub use serialize::serialize;
pub use value::{AttributeMap, Value};

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::text::split_lines;
use scalar::{
    ends_with_matching_quote, force_strip_quotes, parse_scalar, starts_with_quote,
    strip_enclosing_quotes,
};

/// Split a document into attributes and body.
///
/// When the first line (trimmed) is not exactly `---`, the whole input is
/// the body and the map is empty. A missing closing `---` swallows the rest
/// of the document into the frontmatter block, leaving an empty body.
pub fn parse(raw: &str) -> (AttributeMap, String) {
    let lines = split_lines(raw);
    if lines.first().map(|line| line.trim()) != Some("---") {
        return (AttributeMap::new(), raw.to_string());
    }

    let close = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == "---")
        .map_or(lines.len(), |(i, _)| i);

    let attributes = decode(&lines[1..close]);
    let body = if close + 1 < lines.len() {
        lines[close + 1..].join("\n")
    } else {
        String::new()
    };

    (attributes, body)
}

/// `key: value` — key restricted to word characters, value is the rest.
static RE_KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9_]+):\s*(.*)$").unwrap());

/// `- item` list entry, any indentation.
static RE_LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-\s+(.*)$").unwrap());

/// Decode the lines between the `---` markers.
///
/// One current key is tracked at a time, plus an optional open multiline
/// continuation target. Branch order is significant and mirrors the
/// grammar: blank skip → multiline continuation → list item → soft wrap →
/// key/value → ignore.
fn decode(lines: &[&str]) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    let mut current_key: Option<String> = None;
    let mut multiline_key: Option<String> = None;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        // Open quoted scalar spanning physical lines: keep appending until
        // the accumulated value ends with the matching quote.
        if starts_with_whitespace(line)
            && let Some(key) = multiline_key.clone()
        {
            if let Some(Value::String(value)) = attributes.get_mut(&key) {
                let joined = format!("{} {}", value, line.trim()).trim().to_string();
                if ends_with_matching_quote(&joined) {
                    *value = strip_enclosing_quotes(&joined).to_string();
                    multiline_key = None;
                } else {
                    *value = joined;
                }
            }
            continue;
        }

        // List item under a key initialized as a list. A dash line under a
        // scalar key is not list coercion; it falls through below.
        if let Some(caps) = RE_LIST_ITEM.captures(line)
            && let Some(key) = &current_key
            && let Some(Value::List(items)) = attributes.get_mut(key)
        {
            items.push(parse_scalar(&caps[1]));
            continue;
        }

        // Soft line-wrap: indented text continues a plain string scalar.
        if starts_with_whitespace(line)
            && let Some(key) = &current_key
            && let Some(Value::String(value)) = attributes.get_mut(key)
        {
            *value = format!("{} {}", value, line.trim()).trim().to_string();
            continue;
        }

        if let Some(caps) = RE_KEY_VALUE.captures(line) {
            let key = caps[1].to_string();
            let raw_value = &caps[2];
            current_key = Some(key.clone());

            if raw_value.is_empty() {
                // Empty value declares a list awaiting `- item` lines. The
                // grammar cannot express an empty string here, so the
                // ambiguity resolves to an empty list. Note this branch
                // does not clear an open multiline target.
                attributes.insert(key, Value::List(Vec::new()));
            } else {
                let trimmed = raw_value.trim();
                if starts_with_quote(trimmed) && !ends_with_matching_quote(trimmed) {
                    // Opening quote without a close on the same line starts
                    // a multi-line quoted scalar; store raw for now.
                    attributes.insert(key.clone(), Value::String(trimmed.to_string()));
                    multiline_key = Some(key);
                } else {
                    attributes.insert(key, parse_scalar(trimmed));
                    multiline_key = None;
                }
            }
            continue;
        }

        // Unparseable line (bad key name, stray dash with no list): ignored.
    }

    // Unterminated continuation at end of input: close it forcibly.
    if let Some(key) = multiline_key
        && let Some(Value::String(value)) = attributes.get_mut(&key)
    {
        *value = force_strip_quotes(value).to_string();
    }

    attributes
}

fn starts_with_whitespace(line: &str) -> bool {
    line.starts_with(|c: char| c.is_whitespace())
}
