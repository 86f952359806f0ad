//! Refresh command: normalize entry frontmatter and regenerate the CMS
//! select options.
//!
//! Authors stage new taxonomy values through `newType` / `newTags` fields
//! in the CMS. This command folds them into `type` / `tags`, rewrites the
//! touched entries, then refreshes the auto-generated `options:` blocks
//! between marker comments in `admin/config.yml` so the dropdowns offer
//! every value in use:
//!
//! ```yaml
//! # BEGIN_AUTO_TAG_OPTIONS
//! options:
//!   - "rust"
//!   - "wasm"
//! # END_AUTO_TAG_OPTIONS
//! ```

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;

use crate::config::SiteConfig;
use crate::entry::{self, Entry};
use crate::frontmatter::{self, AttributeMap, Value};
use crate::utils::text::split_lines;
use crate::{debug, log};

const TYPE_MARKER_START: &str = "# BEGIN_AUTO_TYPE_OPTIONS";
const TYPE_MARKER_END: &str = "# END_AUTO_TYPE_OPTIONS";
const TAG_MARKER_START: &str = "# BEGIN_AUTO_TAG_OPTIONS";
const TAG_MARKER_END: &str = "# END_AUTO_TAG_OPTIONS";

pub fn run(config: &SiteConfig, dry: bool) -> Result<()> {
    let files = entry::discover(&config.entries_dir())?;

    // Lowercased value -> first spelling seen. BTreeMap keys keep the
    // output sorted case-insensitively.
    let mut types: BTreeMap<String, String> = BTreeMap::new();
    let mut tags: BTreeMap<String, String> = BTreeMap::new();
    let mut rewritten = 0usize;

    for path in &files {
        let mut entry = Entry::load(path)?;

        if normalize(&mut entry.attributes) {
            rewritten += 1;
            if dry {
                log!("refresh"; "would rewrite {}", entry.file_name());
            } else {
                let content =
                    format!("{}\n{}", frontmatter::serialize(&entry.attributes), entry.body);
                fs::write(path, content)
                    .with_context(|| format!("failed to rewrite {}", path.display()))?;
                debug!("refresh"; "rewrote {}", entry.file_name());
            }
        }

        if let Some(kind) = entry.attributes.get("type") {
            add_unique(&mut types, &kind.to_string());
        }
        if let Some(Value::List(items)) = entry.attributes.get("tags") {
            for item in items {
                add_unique(&mut tags, &item.to_string());
            }
        }
    }

    let admin_path = config.admin_config_path();
    let admin = fs::read_to_string(&admin_path)
        .with_context(|| format!("failed to read {}", admin_path.display()))?;

    let next = replace_section(
        &admin,
        TYPE_MARKER_START,
        TYPE_MARKER_END,
        &format_options(types.values()),
    )?;
    let next = replace_section(
        &next,
        TAG_MARKER_START,
        TAG_MARKER_END,
        &format_options(tags.values()),
    )?;
    let next = ensure_trailing_newline(next);

    if dry {
        log!("refresh"; "would update {} with {} types, {} tags",
            admin_path.display(), types.len(), tags.len());
    } else {
        fs::write(&admin_path, next)
            .with_context(|| format!("failed to write {}", admin_path.display()))?;
        log!("refresh"; "updated options: {} types, {} tags ({} entries rewritten)",
            types.len(), tags.len(), rewritten);
    }
    Ok(())
}

/// Fold staged `newType` / `newTags` fields into `type` / `tags`.
/// Returns whether anything changed.
fn normalize(attributes: &mut AttributeMap) -> bool {
    let mut changed = false;

    if let Some(new_type) = attributes.shift_remove("newType") {
        let cleaned = new_type.to_string().trim().to_string();
        if !cleaned.is_empty() {
            attributes.insert("type".to_string(), Value::String(cleaned));
        }
        changed = true;
    }

    let original_len = attributes
        .get("tags")
        .and_then(Value::as_list)
        .map_or(0, |items| items.len());
    let staged = parse_new_tags(attributes.get("newTags"));
    let had_staged_key = attributes.contains_key("newTags");

    let mut merged: Vec<Value> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let existing: Vec<String> = attributes
        .get("tags")
        .and_then(Value::as_list)
        .map(|items| items.iter().map(|item| item.to_string()).collect())
        .unwrap_or_default();
    for tag in existing.iter().chain(staged.iter()) {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        // First spelling wins; later case variants are dropped
        if seen.insert(trimmed.to_lowercase()) {
            merged.push(Value::String(trimmed.to_string()));
        }
    }

    if merged.len() != original_len || had_staged_key {
        attributes.insert("tags".to_string(), Value::List(merged));
        attributes.shift_remove("newTags");
        changed = true;
    }

    changed
}

/// Staged tags: a list, or a comma-separated scalar.
fn parse_new_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::List(items)) => items
            .iter()
            .map(|item| item.to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(scalar) if scalar.truthy() => scalar
            .to_string()
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Record a taxonomy value, case-insensitively, first spelling wins.
fn add_unique(values: &mut BTreeMap<String, String>, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return;
    }
    let key = trimmed.to_lowercase();
    if key == "null" || key == "undefined" {
        return;
    }
    values.entry(key).or_insert_with(|| trimmed.to_string());
}

/// Render an `options:` block, always quoting values so punctuation and
/// numeric-looking tags survive the CMS's YAML loader.
fn format_options<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let lines: Vec<String> = values
        .map(|v| format!("  - \"{}\"", v.replace('"', "\\\"")))
        .collect();
    if lines.is_empty() {
        return vec!["options: []".to_string()];
    }
    let mut out = vec!["options:".to_string()];
    out.extend(lines);
    out
}

/// Replace the lines strictly between two marker lines, re-indenting the
/// replacement to the start marker's indentation. Marker lines stay.
fn replace_section(
    content: &str,
    start_token: &str,
    end_token: &str,
    new_lines: &[String],
) -> Result<String> {
    let lines = split_lines(content);
    let start = lines.iter().position(|l| l.contains(start_token));
    let end = lines.iter().position(|l| l.contains(end_token));

    let (Some(start), Some(end)) = (start, end) else {
        bail!("could not find markers {start_token} / {end_token} in admin config");
    };
    if end <= start {
        bail!("could not find markers {start_token} / {end_token} in admin config");
    }

    let indent: String = lines[start]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let mut updated: Vec<String> = lines[..=start].iter().map(|l| l.to_string()).collect();
    for line in new_lines {
        if line.is_empty() {
            updated.push(indent.clone());
        } else {
            updated.push(format!("{indent}{line}"));
        }
    }
    updated.extend(lines[end..].iter().map(|l| l.to_string()));

    Ok(updated.join("\n"))
}

fn ensure_trailing_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse;

    fn attrs(doc: &str) -> AttributeMap {
        parse(doc).0
    }

    #[test]
    fn test_normalize_folds_new_type() {
        let mut map = attrs("---\ntype: old\nnewType: fresh\n---\n");
        assert!(normalize(&mut map));
        assert_eq!(map.get("type"), Some(&Value::from("fresh")));
        assert!(!map.contains_key("newType"));
    }

    #[test]
    fn test_normalize_drops_blank_new_type() {
        let mut map = attrs("---\ntype: old\nnewType: \"  \"\n---\n");
        assert!(normalize(&mut map));
        assert_eq!(map.get("type"), Some(&Value::from("old")));
    }

    #[test]
    fn test_normalize_merges_new_tags() {
        let mut map = attrs("---\ntags:\n  - rust\nnewTags: wasm, Rust\n---\n");
        assert!(normalize(&mut map));
        // "Rust" dedups against "rust", first spelling wins
        assert_eq!(
            map.get("tags"),
            Some(&Value::List(vec![Value::from("rust"), Value::from("wasm")]))
        );
        assert!(!map.contains_key("newTags"));
    }

    #[test]
    fn test_normalize_dedups_existing_tags() {
        let mut map = attrs("---\ntags:\n  - web\n  - Web\n---\n");
        assert!(normalize(&mut map));
        assert_eq!(map.get("tags"), Some(&Value::List(vec![Value::from("web")])));
    }

    #[test]
    fn test_normalize_untouched_entry_is_unchanged() {
        let mut map = attrs("---\ntitle: t\ntags:\n  - a\n---\n");
        assert!(!normalize(&mut map));
    }

    #[test]
    fn test_add_unique_skips_junk() {
        let mut values = BTreeMap::new();
        add_unique(&mut values, "Paper");
        add_unique(&mut values, "paper");
        add_unique(&mut values, "  ");
        add_unique(&mut values, "null");
        assert_eq!(values.values().collect::<Vec<_>>(), vec!["Paper"]);
    }

    #[test]
    fn test_format_options() {
        let values = vec!["a \"quoted\"".to_string(), "b".to_string()];
        assert_eq!(
            format_options(values.iter()),
            vec!["options:", "  - \"a \\\"quoted\\\"\"", "  - \"b\""]
        );

        let empty: Vec<String> = Vec::new();
        assert_eq!(format_options(empty.iter()), vec!["options: []"]);
    }

    #[test]
    fn test_replace_section_preserves_indent() {
        let config = "fields:\n    # BEGIN_AUTO_TAG_OPTIONS\n    options: []\n    # END_AUTO_TAG_OPTIONS\ntail";
        let updated = replace_section(
            config,
            TAG_MARKER_START,
            TAG_MARKER_END,
            &["options:".to_string(), "  - \"x\"".to_string()],
        )
        .unwrap();
        assert_eq!(
            updated,
            "fields:\n    # BEGIN_AUTO_TAG_OPTIONS\n    options:\n      - \"x\"\n    # END_AUTO_TAG_OPTIONS\ntail"
        );
    }

    #[test]
    fn test_replace_section_missing_markers() {
        assert!(replace_section("no markers", TAG_MARKER_START, TAG_MARKER_END, &[]).is_err());
    }

    #[test]
    fn test_end_to_end_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let entries_dir = dir.path().join("content/entries");
        fs::create_dir_all(&entries_dir).unwrap();
        fs::write(
            entries_dir.join("a.md"),
            "---\nid: a\ntitle: T\nsection: s\ntype: paper\ntags:\n  - rust\nnewTags: wasm\n---\nbody",
        )
        .unwrap();

        let admin_dir = dir.path().join("admin");
        fs::create_dir_all(&admin_dir).unwrap();
        fs::write(
            admin_dir.join("config.yml"),
            "collections:\n  # BEGIN_AUTO_TYPE_OPTIONS\n  options: []\n  # END_AUTO_TYPE_OPTIONS\n  # BEGIN_AUTO_TAG_OPTIONS\n  options: []\n  # END_AUTO_TAG_OPTIONS\n",
        )
        .unwrap();

        let config = SiteConfig {
            root: dir.path().to_path_buf(),
            config_path: std::path::PathBuf::new(),
            ..Default::default()
        };
        run(&config, false).unwrap();

        let rewritten = fs::read_to_string(entries_dir.join("a.md")).unwrap();
        assert!(rewritten.contains("  - \"wasm\""));
        assert!(!rewritten.contains("newTags"));
        assert!(rewritten.ends_with("body"));

        let admin = fs::read_to_string(admin_dir.join("config.yml")).unwrap();
        assert!(admin.contains("  options:\n    - \"paper\""));
        assert!(admin.contains("    - \"rust\"\n    - \"wasm\""));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let entries_dir = dir.path().join("content/entries");
        fs::create_dir_all(&entries_dir).unwrap();
        let original = "---\nid: a\ntitle: T\nsection: s\nnewTags: x\n---\n";
        fs::write(entries_dir.join("a.md"), original).unwrap();

        let admin_dir = dir.path().join("admin");
        fs::create_dir_all(&admin_dir).unwrap();
        let admin_original = "# BEGIN_AUTO_TYPE_OPTIONS\n# END_AUTO_TYPE_OPTIONS\n# BEGIN_AUTO_TAG_OPTIONS\n# END_AUTO_TAG_OPTIONS\n";
        fs::write(admin_dir.join("config.yml"), admin_original).unwrap();

        let config = SiteConfig {
            root: dir.path().to_path_buf(),
            config_path: std::path::PathBuf::new(),
            ..Default::default()
        };
        run(&config, true).unwrap();

        assert_eq!(fs::read_to_string(entries_dir.join("a.md")).unwrap(), original);
        assert_eq!(
            fs::read_to_string(admin_dir.join("config.yml")).unwrap(),
            admin_original
        );
    }
}
