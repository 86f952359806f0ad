//! Inline substitution pipeline: images, bold, italic, code spans, links.
//!
//! Not an AST. The block text is HTML-escaped once, then an ordered list of
//! regex rules rewrites it in place, each rule injecting raw tags the later
//! rules leave alone. The order is load-bearing:
//!
//! - images run before links, so `![x](y)` never degenerates into an `<a>`;
//! - bold runs before italic, so single-star matching only sees the stars
//!   double-star matching left behind.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::escape::{escape, escape_attr};
use super::target::parse_image_target;

type Substitution = fn(&Captures) -> String;

/// The substitution rules, applied in order over the escaped buffer.
static RULES: LazyLock<Vec<(Regex, Substitution)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"!\[(.*?)\]\((.+?)\)").unwrap(), image as Substitution),
        (Regex::new(r"\*\*(.+?)\*\*").unwrap(), bold),
        (Regex::new(r"\*(.+?)\*").unwrap(), italic),
        (Regex::new(r"`([^`]+)`").unwrap(), code),
        (Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap(), link),
    ]
});

/// Render the inline run of a block to HTML.
pub fn render_inline(text: &str) -> String {
    let mut html = escape(text).into_owned();
    for (re, substitute) in RULES.iter() {
        html = re
            .replace_all(&html, |caps: &Captures| substitute(caps))
            .into_owned();
    }
    html
}

fn image(caps: &Captures) -> String {
    let alt = &caps[1];
    let (url, _title) = parse_image_target(&caps[2]);
    if url.is_empty() {
        // Malformed reference: keep the (already escaped) original text
        return caps[0].to_string();
    }
    format!(
        "<img src=\"{}\" alt=\"{}\">",
        escape_attr(&url),
        escape_attr(alt)
    )
}

fn bold(caps: &Captures) -> String {
    format!("<strong>{}</strong>", &caps[1])
}

fn italic(caps: &Captures) -> String {
    format!("<em>{}</em>", &caps[1])
}

fn code(caps: &Captures) -> String {
    format!("<code>{}</code>", &caps[1])
}

fn link(caps: &Captures) -> String {
    // The label was escaped with the rest of the text in step one and is
    // inserted without further transformation
    format!("<a href=\"{}\">{}</a>", escape_attr(&caps[2]), &caps[1])
}
