//! Folio - a content pipeline for portfolio static sites.
//!
//! Entries are Markdown documents with frontmatter; `folio build` turns
//! them into a JSON index plus per-entry HTML fragments the browser-side
//! pages consume.

#![allow(dead_code)]

mod cli;
mod config;
mod entry;
mod frontmatter;
mod logger;
mod markdown;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build => cli::build::run(&config),
        Commands::Check { warn_only } => cli::check::run(&config, *warn_only),
        Commands::Refresh { dry } => cli::refresh::run(&config, *dry),
    }
}
