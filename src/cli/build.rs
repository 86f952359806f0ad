//! Build command: entries in, JSON index and HTML fragments out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::entry::{self, Entry, EntryRecord, sort_records};
use crate::markdown;
use crate::{debug, log};

/// Build the content index and per-entry fragments.
///
/// Entries are independent, so parsing and rendering fan out across
/// threads; the core parsers are pure and need no synchronization.
pub fn run(config: &SiteConfig) -> Result<()> {
    let files = entry::discover(&config.entries_dir())?;

    let mut records = files
        .par_iter()
        .map(|path| build_entry(path, config))
        .collect::<Result<Vec<EntryRecord>>>()?;
    sort_records(&mut records);

    write_index(&records, config)?;
    warn_about_pinned(&records);

    log!(
        "build";
        "built {} {}",
        records.len(),
        if records.len() == 1 { "entry" } else { "entries" }
    );
    Ok(())
}

/// Parse one entry, render its body, write its fragment.
fn build_entry(path: &Path, config: &SiteConfig) -> Result<EntryRecord> {
    let entry = Entry::load(path)?;
    let record = entry.to_record()?;

    let html = markdown::render(&entry.body);
    let fragment_path = config.root_join(&record.content_path);
    if let Some(parent) = fragment_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&fragment_path, html)
        .with_context(|| format!("failed to write fragment {}", fragment_path.display()))?;

    debug!("build"; "{} -> {}", entry.file_name(), record.content_path);
    Ok(record)
}

/// Write the sorted index, pretty-printed for diff-friendly commits.
fn write_index(records: &[EntryRecord], config: &SiteConfig) -> Result<()> {
    let index_path = config.index_path();
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&index_path, json)
        .with_context(|| format!("failed to write index {}", index_path.display()))
}

/// The homepage hero shows one pinned entry; flag both extremes.
fn warn_about_pinned(records: &[EntryRecord]) {
    let pinned: Vec<&str> = records
        .iter()
        .filter(|r| r.pinned)
        .map(|r| r.slug.as_str())
        .collect();

    if pinned.len() > 1 {
        log!(
            "warning";
            "multiple pinned entries, the most recent wins for the homepage hero: {}",
            pinned.join(", ")
        );
    } else if pinned.is_empty() {
        log!("warning"; "no pinned entry; the homepage hero stays empty until one is pinned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_site(entries: &[(&str, &str)]) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let entries_dir = dir.path().join("content/entries");
        fs::create_dir_all(&entries_dir).unwrap();
        for (name, content) in entries {
            fs::write(entries_dir.join(name), content).unwrap();
        }
        let config = SiteConfig {
            root: dir.path().to_path_buf(),
            config_path: PathBuf::new(),
            ..Default::default()
        };
        (dir, config)
    }

    const ENTRY_A: &str = "---\n\
        id: alpha\n\
        title: Alpha Project\n\
        section: projects\n\
        year: 2020\n\
        pinned: true\n\
        ---\n\
        # Alpha\n\
        \n\
        Body with ![shot](shot.png).";

    const ENTRY_B: &str = "---\n\
        id: beta\n\
        title: Beta Paper\n\
        section: research\n\
        year: 2023\n\
        ---\n\
        Newer body.";

    #[test]
    fn test_build_writes_sorted_index_and_fragments() {
        let (dir, config) = test_site(&[("alpha.md", ENTRY_A), ("beta.md", ENTRY_B)]);
        run(&config).unwrap();

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.index_path()).unwrap()).unwrap();
        let slugs: Vec<&str> = index
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["slug"].as_str().unwrap())
            .collect();
        // Year-descending: 2023 before 2020
        assert_eq!(slugs, vec!["beta-paper", "alpha-project"]);

        let fragment =
            fs::read_to_string(dir.path().join("content/alpha-project.html")).unwrap();
        assert!(fragment.starts_with("<h1>Alpha</h1>"));
        assert!(fragment.contains("<img src=\"shot.png\""));
    }

    #[test]
    fn test_build_derives_images_from_body() {
        let (_dir, config) = test_site(&[("alpha.md", ENTRY_A)]);
        run(&config).unwrap();

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.index_path()).unwrap()).unwrap();
        assert_eq!(index[0]["images"], serde_json::json!(["shot.png"]));
    }

    #[test]
    fn test_build_fails_on_missing_required_field() {
        let (_dir, config) = test_site(&[("bad.md", "---\nid: x\ntitle: No Section\n---\n")]);
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("section"));
    }

    #[test]
    fn test_build_empty_entries_dir() {
        let (_dir, config) = test_site(&[]);
        run(&config).unwrap();
        let index = fs::read_to_string(config.index_path()).unwrap();
        assert_eq!(index, "[]");
    }
}
