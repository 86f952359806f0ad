//! Restricted Markdown rendering for entry bodies.
//!
//! This module contains the body-to-HTML half of the parser core:
//!
//! - [`render`] - block + inline passes producing an HTML fragment
//! - [`extract_images`] - image-reference scan without rendering
//! - [`parse_image_target`] - shared `url "title"` target splitting
//!
//! The dialect is deliberately small: `#`/`##`/`###` headings, paragraphs,
//! fenced code blocks, bold, italic, inline code, links and images. No
//! tables, blockquotes, nested lists or reference definitions. Rendering
//! never fails; any input produces a fragment.

mod block;
mod escape;
mod extract;
mod inline;
mod target;

pub use extract::extract_images;
pub use target::parse_image_target;

use block::Block;
use escape::{escape, escape_attr};
use inline::render_inline;

use crate::utils::text::split_lines;

/// Render Markdown to an HTML fragment.
///
/// Blocks are joined with a single newline. Input with no non-blank
/// content renders as an empty paragraph.
pub fn render(markdown: &str) -> String {
    let lines = split_lines(markdown);
    let blocks = block::segment(&lines);

    if blocks.is_empty() {
        return "<p></p>".to_string();
    }

    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", render_inline(text))
        }
        Block::Code { lang, text } => {
            if lang.is_empty() {
                format!("<pre><code>{}</code></pre>", escape(text))
            } else {
                format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    escape_attr(lang),
                    escape(text)
                )
            }
        }
        Block::Paragraph { text } => {
            // Line breaks inside a paragraph become <br>, after inline
            // substitution so the rules never see injected tags
            format!("<p>{}</p>", render_inline(text).replace('\n', "<br>"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "<p></p>");
    }

    #[test]
    fn test_blank_only_input() {
        assert_eq!(render("\n\n   \n"), "<p></p>");
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            render("# Title\n\nHello **world**"),
            "<h1>Title</h1>\n<p>Hello <strong>world</strong></p>"
        );
    }

    #[test]
    fn test_code_block_with_language() {
        assert_eq!(
            render("```js\nlet x = 1;\n```"),
            "<pre><code class=\"language-js\">let x = 1;</code></pre>"
        );
    }

    #[test]
    fn test_code_block_without_language() {
        assert_eq!(render("```\nraw\n```"), "<pre><code>raw</code></pre>");
    }

    #[test]
    fn test_code_block_content_escaped_not_rendered() {
        assert_eq!(
            render("```\n**<b>**\n```"),
            "<pre><code>**&lt;b&gt;**</code></pre>"
        );
    }

    #[test]
    fn test_paragraph_line_breaks() {
        assert_eq!(render("one\ntwo"), "<p>one<br>two</p>");
    }

    #[test]
    fn test_blank_line_runs_do_not_change_output() {
        assert_eq!(render("a\n\nb"), render("a\n\n\n\n\nb"));
    }

    #[test]
    fn test_image_never_renders_as_link() {
        let html = render("![alt](x.png)");
        assert!(html.contains("<img"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_heading_inline_formatting() {
        assert_eq!(render("## A *b* c"), "<h2>A <em>b</em> c</h2>");
    }

    #[test]
    fn test_user_markup_escaped() {
        assert_eq!(
            render("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_document_order_preserved() {
        let html = render("# H\n\npara\n\n```\ncode\n```\n\ntail");
        assert_eq!(
            html,
            "<h1>H</h1>\n<p>para</p>\n<pre><code>code</code></pre>\n<p>tail</p>"
        );
    }
}
