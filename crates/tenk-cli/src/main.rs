//! tenk CLI - command-line interface for the 10-K structural parsing and
//! chunking pipeline.
//!
//! # Architecture
//!
//! Built with `clap`, exposing two commands:
//! - `parse`: turn a local 10-K HTML file into structural nodes, optionally
//!   chunked, printed as text or JSON
//! - `version`: show version information
//!
//! # Filing metadata
//!
//! `parse_filing` requires a [`tenk_core::FilingMeta`] alongside the HTML.
//! The CLI builds one from:
//! 1. Explicit: `--meta path/to/filing.json`
//! 2. Auto-discovery: searches for `filing.json` in the current and parent
//!    directories
//! 3. Individual `--company`/`--ticker`/... flags, which override whichever
//!    of the above was found (and are required if neither was)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - Non-zero: Error (see stderr for details)
//!
//! # Examples
//!
//! ```bash
//! # Parse a filing into structural nodes
//! tenk parse filing.htm --meta filing.json
//!
//! # Parse and chunk, emitting JSON
//! tenk parse filing.htm --meta filing.json --chunk --format json
//! ```

#![deny(unsafe_code)]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use commands::meta::FilingMetaArgs;

/// 10-K structural parsing and chunking CLI
#[derive(Parser)]
#[command(name = "tenk")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a 10-K HTML filing into structural nodes, optionally chunked
    Parse {
        /// Path to the filing's HTML file
        path: PathBuf,

        #[command(flatten)]
        meta: FilingMetaArgs,

        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Regroup the parsed nodes into word-budgeted chunks
        #[arg(long)]
        chunk: bool,
    },

    /// Show version information
    Version {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'text' or 'json'", s)),
        }
    }
}

/// Validates that a file exists and is accessible.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist in the filesystem
/// - The path exists but is not a regular file (e.g., is a directory)
fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!(
            "File not found: '{}'. Please check that the file exists and is accessible.",
            path.display()
        );
    }
    if !path.is_file() {
        anyhow::bail!(
            "Path is not a file: '{}'. Please provide a path to a regular file.",
            path.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            path,
            meta,
            format,
            chunk,
        } => {
            validate_file_exists(&path)?;

            let filing_meta = commands::meta::load_filing_meta(meta)?;
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read filing HTML from '{}'", path.display()))?;

            commands::parse::run(&html, filing_meta, chunk, format.into())?;
        }

        Commands::Version { format } => {
            let name = env!("CARGO_PKG_NAME");
            let version = env!("CARGO_PKG_VERSION");

            match format {
                OutputFormat::Text => println!("{} {}", name, version),
                OutputFormat::Json => {
                    let output = serde_json::json!({ "name": name, "version": version });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&output)
                            .context("Failed to serialize version information to JSON")?
                    );
                }
            }
        }
    }

    Ok(())
}

impl From<OutputFormat> for commands::parse::OutputFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => commands::parse::OutputFormat::Text,
            OutputFormat::Json => commands::parse::OutputFormat::Json,
        }
    }
}
