//! Project configuration management for `folio.toml`.
//!
//! | Section   | Purpose                                          |
//! |-----------|--------------------------------------------------|
//! | `[paths]` | Content tree layout relative to the project root |
//!
//! A missing config file is not an error — every field has a default
//! matching the conventional layout, so a bare project just works.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::log;

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Content tree layout
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Locations of the content tree, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding entry documents (`*.md` with frontmatter)
    pub entries: PathBuf,
    /// Output path of the JSON content index
    pub index: PathBuf,
    /// CMS admin config rewritten by `refresh`
    pub admin_config: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            entries: PathBuf::from("content/entries"),
            index: PathBuf::from("data/content.json"),
            admin_config: PathBuf::from("admin/config.yml"),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// The project root is `--root` or the current directory; the config
    /// file is looked up relative to it and falls back to defaults when
    /// absent.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("failed to get current working directory")?,
        };
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.root = root;
        config.config_path = config_path;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}: {}", path.display(), ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute entries directory.
    pub fn entries_dir(&self) -> PathBuf {
        self.root_join(&self.paths.entries)
    }

    /// Absolute path of the JSON index.
    pub fn index_path(&self) -> PathBuf {
        self.root_join(&self.paths.index)
    }

    /// Absolute path of the CMS admin config.
    pub fn admin_config_path(&self) -> PathBuf {
        self.root_join(&self.paths.admin_config)
    }
}
