//! Block segmentation: one forward scan over lines, no backtracking.

/// A block-level unit in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `# ` / `## ` / `### ` heading; deeper levels are not recognized.
    Heading { level: u8, text: String },
    /// Fenced code block. `lang` is the trimmed text after the opening
    /// backticks; content is verbatim, never inline-processed.
    Code { lang: String, text: String },
    /// Everything else: consecutive non-blank lines joined with `\n`.
    Paragraph { text: String },
}

/// Segment lines into blocks.
///
/// Blank lines separate blocks and never appear inside one (except inside a
/// fence, where lines are taken verbatim). An unterminated fence captures
/// everything to end of input.
pub fn segment(lines: &[&str]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        if let Some(rest) = trimmed.strip_prefix("```") {
            let lang = rest.trim().to_string();
            let mut content = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                content.push(lines[i]);
                i += 1;
            }
            if i < lines.len() {
                i += 1; // consume the closing fence
            }
            blocks.push(Block::Code {
                lang,
                text: content.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        let mut paragraph = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            paragraph.push(lines[i]);
            i += 1;
        }
        let text = paragraph.join("\n").trim().to_string();
        if !text.is_empty() {
            blocks.push(classify(text));
        }
    }

    blocks
}

/// Classify joined block text by its exact prefix.
fn classify(text: String) -> Block {
    for (prefix, level) in [("# ", 1u8), ("## ", 2), ("### ", 3)] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return Block::Heading {
                level,
                text: rest.to_string(),
            };
        }
    }
    Block::Paragraph { text }
}
