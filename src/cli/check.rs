//! Check command: validate entries without writing anything.

use anyhow::{Result, bail};
use rustc_hash::FxHashMap;

use crate::config::SiteConfig;
use crate::entry::{self, Entry, derive_year};
use crate::log;

/// Validate every entry and report problems.
///
/// Errors: unreadable files, missing required fields, duplicate slugs.
/// Warnings: missing/underivable year, pinned-entry count. Returns an
/// error when anything failed, unless `warn_only` downgrades it.
pub fn run(config: &SiteConfig, warn_only: bool) -> Result<()> {
    let files = entry::discover(&config.entries_dir())?;

    let mut errors = 0usize;
    let mut warnings = 0usize;
    let mut pinned = 0usize;
    // slug -> first file that claimed it
    let mut slugs: FxHashMap<String, String> = FxHashMap::default();

    for path in &files {
        let entry = match Entry::load(path) {
            Ok(entry) => entry,
            Err(err) => {
                log!("error"; "{err:#}");
                errors += 1;
                continue;
            }
        };

        let record = match entry.to_record() {
            Ok(record) => record,
            Err(err) => {
                log!("error"; "{err}");
                errors += 1;
                continue;
            }
        };

        if record.pinned {
            pinned += 1;
        }

        if let Some(previous) = slugs.insert(record.slug.clone(), entry.file_name()) {
            log!(
                "error";
                "duplicate slug \"{}\" in {} (already used by {})",
                record.slug, entry.file_name(), previous
            );
            errors += 1;
        }

        if !has_usable_year(&entry) {
            log!("warning"; "missing or invalid year in {}", entry.file_name());
            warnings += 1;
        }
    }

    if pinned > 1 {
        log!("warning"; "{pinned} pinned entries; only one shows on the homepage hero");
        warnings += 1;
    } else if pinned == 0 && !files.is_empty() {
        log!("warning"; "no pinned entry; the homepage hero stays empty");
        warnings += 1;
    }

    log!(
        "check";
        "{} {}, {} {}, {} {}",
        files.len(),
        if files.len() == 1 { "entry" } else { "entries" },
        errors,
        if errors == 1 { "error" } else { "errors" },
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }
    );

    if errors > 0 && !warn_only {
        bail!("validation failed with {errors} error{}", if errors == 1 { "" } else { "s" });
    }
    Ok(())
}

/// A year is usable when the `year` attribute is a non-zero number (or
/// numeric string), or when `fullDate` leads with four digits.
fn has_usable_year(entry: &Entry) -> bool {
    if entry
        .attributes
        .get("year")
        .is_some_and(|v| v.numeric() != 0.0)
    {
        return true;
    }
    entry
        .attributes
        .get("fullDate")
        .and_then(|v| derive_year(&v.to_string()))
        .is_some()
}
