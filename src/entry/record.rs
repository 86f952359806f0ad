//! The typed record each entry contributes to `data/content.json`.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// One row of the content index, in wire order.
///
/// Optional fields absent from the frontmatter are omitted from the JSON
/// entirely. `year` and `summary` pass through as raw JSON so a quoted
/// year stays a string and an unquoted one stays a number.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub id: String,
    pub title: String,
    pub section: String,
    pub slug: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<JsonValue>,
    pub images: Vec<String>,
    pub featured: bool,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub content_path: String,
}

impl EntryRecord {
    /// Numeric sort key; non-numeric or missing years sort last.
    fn year_key(&self) -> f64 {
        match &self.year {
            Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(JsonValue::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Index order: year descending, then title ascending (case-insensitive).
pub fn sort_records(records: &mut [EntryRecord]) {
    records.sort_by(|a, b| {
        b.year_key()
            .partial_cmp(&a.year_key())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}
