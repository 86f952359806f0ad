//! Image-reference extraction without rendering.
//!
//! The index builder falls back to this when an entry's frontmatter lists
//! no images: the first body image becomes the card thumbnail.

use std::sync::LazyLock;

use regex::Regex;

use super::target::parse_image_target;

/// `![alt](target)` anywhere in the raw text. Fenced code is not exempted;
/// the scan is a flat pass over the source.
static RE_IMAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").unwrap());

/// Collect the url of every image reference, in document order.
/// Quoted titles are parsed off and discarded; empty urls are skipped.
pub fn extract_images(markdown: &str) -> Vec<String> {
    RE_IMAGE_REF
        .captures_iter(markdown)
        .filter_map(|caps| {
            let (url, _title) = parse_image_target(&caps[1]);
            if url.is_empty() { None } else { Some(url) }
        })
        .collect()
}
