//! Scalar decoding: quoted text, boolean literals, numbers, bare strings.

use super::Value;

/// Decode a single scalar.
///
/// Predicates apply in a fixed order: quoted → boolean literal → finite
/// number → bare string. The order matters — `"2021"` stays a string while
/// `2021` becomes a number, and `true` quoted stays text.
pub fn parse_scalar(text: &str) -> Value {
    let trimmed = text.trim();

    if is_quoted(trimmed) {
        return Value::String(strip_enclosing_quotes(trimmed).to_string());
    }
    if trimmed == "true" {
        return Value::Bool(true);
    }
    if trimmed == "false" {
        return Value::Bool(false);
    }
    // Finite decimals only; "2021a" or "inf" fall through to string
    if let Ok(n) = trimmed.parse::<f64>()
        && n.is_finite()
    {
        return Value::Number(n);
    }

    Value::String(trimmed.to_string())
}

/// Whether text begins with a quote character (`'` or `"`).
pub fn starts_with_quote(text: &str) -> bool {
    matches!(text.as_bytes().first(), Some(b'\'' | b'"'))
}

/// Whether text both begins with a quote and ends with the same quote.
pub fn ends_with_matching_quote(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    matches!(bytes[0], b'\'' | b'"') && bytes[bytes.len() - 1] == bytes[0]
}

/// Fully wrapped in matching quotes.
pub fn is_quoted(text: &str) -> bool {
    starts_with_quote(text) && ends_with_matching_quote(text)
}

/// Strip enclosing quotes when present; otherwise return the text as-is.
/// No escape-sequence interpretation — the inner text is verbatim.
pub fn strip_enclosing_quotes(text: &str) -> &str {
    if is_quoted(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Close an unterminated quoted scalar at end of input: drop the opening
/// quote, plus a trailing quote when it happens to match.
pub fn force_strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    let Some(&quote) = bytes.first() else {
        return text;
    };
    if quote != b'\'' && quote != b'"' {
        return text;
    }
    let inner = &text[1..];
    match inner.as_bytes().last() {
        Some(&last) if last == quote => &inner[..inner.len() - 1],
        _ => inner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_strings() {
        assert_eq!(parse_scalar("\"hello\""), Value::from("hello"));
        assert_eq!(parse_scalar("'hello'"), Value::from("hello"));
        // Quoting shields type coercion
        assert_eq!(parse_scalar("\"2021\""), Value::from("2021"));
        assert_eq!(parse_scalar("\"true\""), Value::from("true"));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(parse_scalar("true"), Value::Bool(true));
        assert_eq!(parse_scalar("false"), Value::Bool(false));
        // Exact, case-sensitive match only
        assert_eq!(parse_scalar("True"), Value::from("True"));
        assert_eq!(parse_scalar("FALSE"), Value::from("FALSE"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_scalar("2021"), Value::Number(2021.0));
        assert_eq!(parse_scalar("-1.5"), Value::Number(-1.5));
        assert_eq!(parse_scalar("+3"), Value::Number(3.0));
        assert_eq!(parse_scalar(".5"), Value::Number(0.5));
    }

    #[test]
    fn test_numeric_garbage_stays_string() {
        assert_eq!(parse_scalar("2021a"), Value::from("2021a"));
        assert_eq!(parse_scalar("1.2.3"), Value::from("1.2.3"));
        // Non-finite parses are rejected
        assert_eq!(parse_scalar("inf"), Value::from("inf"));
        assert_eq!(parse_scalar("NaN"), Value::from("NaN"));
    }

    #[test]
    fn test_bare_string_trimmed() {
        assert_eq!(parse_scalar("  plain text  "), Value::from("plain text"));
    }

    #[test]
    fn test_mismatched_quotes() {
        // Opening and closing quotes must match
        assert_eq!(parse_scalar("\"half'"), Value::from("\"half'"));
        // A lone quote is not a quoted string
        assert_eq!(parse_scalar("\""), Value::from("\""));
    }

    #[test]
    fn test_force_strip() {
        assert_eq!(force_strip_quotes("\"open ended"), "open ended");
        assert_eq!(force_strip_quotes("\"closed\""), "closed");
        assert_eq!(force_strip_quotes("no quotes"), "no quotes");
        assert_eq!(force_strip_quotes(""), "");
    }
}
