//! Line splitting shared by the frontmatter and Markdown parsers.

/// Split text into lines, treating `\r\n` and `\n` as equivalent separators.
///
/// Unlike [`str::lines`], a trailing newline yields a final empty element,
/// so `join("\n")` over a sub-slice reconstructs the source text exactly.
/// Both parsers rely on this when re-assembling body text.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
