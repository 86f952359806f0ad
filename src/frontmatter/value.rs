//! Typed attribute values decoded from frontmatter.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Attribute map decoded from a frontmatter block.
///
/// Insertion order is preserved so that re-serializing a parsed map
/// keeps the author's key order.
pub type AttributeMap = IndexMap<String, Value>;

/// A single frontmatter value.
///
/// The grammar infers the variant from the scalar's shape: quoted text is
/// always a string, `true`/`false` are booleans, finite decimals are
/// numbers, everything else is a string. Lists are flat; items are scalars,
/// never nested lists or maps.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    /// Decimal number. No int/float distinction; `2021` and `20.5` both
    /// land here.
    Number(f64),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Truthiness in the loose sense the index builder uses for flags:
    /// empty strings and zero are false, any list is true.
    pub fn truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0,
            Self::Bool(b) => *b,
            Self::List(_) => true,
        }
    }

    /// Numeric view used for sorting: numbers as-is, numeric-looking
    /// strings parsed, everything else zero.
    pub fn numeric(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Convert to a JSON value for the content index.
    ///
    /// Whole numbers serialize as integers so `year: 2021` round-trips as
    /// `2021`, not `2021.0`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Number(n) => number_to_json(*n),
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
        }
    }
}

#[allow(clippy::cast_possible_truncation)] // Guarded by the exact-integer check
fn number_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        JsonValue::Number((n as i64).into())
    } else {
        serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
    }
}

/// Render a number the way the serializer writes it: shortest decimal form,
/// no trailing `.0` for whole numbers.
#[allow(clippy::cast_possible_truncation)] // Guarded by the exact-integer check
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    /// Plain-text form, used when a scalar is coerced to a string
    /// (slug sources, tag merging). Lists join with commas.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
