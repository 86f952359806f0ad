//! Entry documents: discovery, loading, and index-record building.
//!
//! An entry is one Markdown file with frontmatter under the entries
//! directory. The build step turns each into an [`EntryRecord`] for the
//! JSON index plus an HTML fragment written to the record's content path.

mod record;
mod slug;

pub use record::{EntryRecord, sort_records};
pub use slug::{derive_year, slugify};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::frontmatter::{self, AttributeMap, Value};
use crate::markdown;

/// Validation failure for a single entry document.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry missing \"{field}\" in {file}")]
    MissingField { field: &'static str, file: String },
}

/// A parsed entry document.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub attributes: AttributeMap,
    pub body: String,
}

impl Entry {
    /// Read and parse an entry file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read entry {}", path.display()))?;
        let (attributes, body) = frontmatter::parse(&raw);
        Ok(Self {
            path: path.to_path_buf(),
            attributes,
            body,
        })
    }

    /// File name for error messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Attribute as text, if the key is present at all.
    fn text(&self, key: &str) -> Option<String> {
        self.attributes.get(key).map(|v| v.to_string())
    }

    /// Attribute as text when present and non-empty.
    fn non_empty_text(&self, key: &str) -> Option<String> {
        self.attributes
            .get(key)
            .filter(|v| v.truthy())
            .map(|v| v.to_string())
    }

    fn required(&self, field: &'static str) -> Result<String, EntryError> {
        self.non_empty_text(field).ok_or_else(|| EntryError::MissingField {
            field,
            file: self.file_name(),
        })
    }

    fn flag(&self, key: &str) -> bool {
        self.attributes.get(key).is_some_and(Value::truthy)
    }

    /// Build the index record for this entry.
    ///
    /// `id`, `title` and `section` are required. When the frontmatter lists
    /// no usable images, the body is scanned for image references instead.
    pub fn to_record(&self) -> Result<EntryRecord, EntryError> {
        let id = self.required("id")?;
        let title = self.required("title")?;
        let section = self.required("section")?;

        let slug = slugify(&self.non_empty_text("slug").unwrap_or_else(|| title.clone()));

        let mut images = self.list_of_strings("images");
        if images.is_empty() {
            images = markdown::extract_images(&self.body);
        }

        let content_path = self
            .non_empty_text("contentPath")
            .unwrap_or_else(|| format!("content/{slug}.html"));

        Ok(EntryRecord {
            id,
            title,
            section,
            slug,
            kind: self.text("type"),
            year: self.attributes.get("year").map(Value::to_json),
            full_date: self.text("fullDate"),
            tags: self.attributes.get("tags").map(|v| match v {
                Value::List(items) => items.iter().map(|item| item.to_string()).collect(),
                scalar => vec![scalar.to_string()],
            }),
            summary: self.attributes.get("summary").map(Value::to_json),
            images,
            featured: self.flag("featured"),
            pinned: self.flag("pinned"),
            link: self.text("link"),
            content_path,
        })
    }

    /// List attribute as non-empty strings; scalars and missing keys
    /// yield an empty vec (matching the index builder's "only a real list
    /// counts" rule).
    fn list_of_strings(&self, key: &str) -> Vec<String> {
        self.attributes
            .get(key)
            .and_then(Value::as_list)
            .map(|items| {
                items
                    .iter()
                    .map(|item| item.to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Enumerate entry files (`*.md`, case-insensitive) in name order.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read entries directory {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        })
        .collect();
    files.sort();
    Ok(files)
}
