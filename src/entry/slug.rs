//! Slug and year derivation from entry metadata.

use deunicode::deunicode;

/// Derive a URL slug: transliterate Unicode to ASCII, lowercase, collapse
/// every run of non-alphanumerics to a single dash, trim dashes.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Derive a year from a date string that leads with four digits
/// (`2021-06-15`, `2021`). Anything else yields `None`.
pub fn derive_year(date: &str) -> Option<i64> {
    let digits = date.trim().as_bytes().get(..4)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}
