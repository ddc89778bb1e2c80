//! Filing metadata loading: the `FilingMeta` every `parse_filing` call needs,
//! assembled from an explicit file, auto-discovery, or individual flags.
//!
//! Three-tier hierarchy: an explicit `--meta` file wins, then an
//! auto-discovered one, then flags fill in (or build from scratch) whatever
//! is still missing.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};

use tenk_core::{FilingForm, FilingMeta};

/// Name searched for during auto-discovery.
const DISCOVERY_FILENAME: &str = "filing.json";

#[derive(Args, Debug, Clone, Default)]
pub struct FilingMetaArgs {
    /// Path to a JSON file containing the full filing metadata. If not
    /// specified, searches for `filing.json` in the current and parent
    /// directories before falling back to the flags below.
    #[arg(long)]
    pub meta: Option<PathBuf>,

    /// Issuer name (overrides the loaded file, if any)
    #[arg(long)]
    pub company: Option<String>,

    /// Ticker symbol (overrides the loaded file, if any)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Period of report, as reported by the filer, e.g. "2025-09-27"
    /// (overrides the loaded file, if any)
    #[arg(long)]
    pub period_of_report: Option<String>,

    /// Filing date, YYYY-MM-DD (overrides the loaded file, if any)
    #[arg(long)]
    pub filing_date: Option<String>,

    /// Fiscal year (overrides the loaded file, if any)
    #[arg(long)]
    pub year: Option<i32>,

    /// Source URL of the filing (overrides the loaded file, if any)
    #[arg(long)]
    pub filing_url: Option<String>,
}

/// Walks from `start` upward looking for `filename`, stopping at the first
/// match or the filesystem root.
fn discover_from(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn discover(filename: &str) -> Option<PathBuf> {
    let dir = std::env::current_dir().ok()?;
    discover_from(&dir, filename)
}

fn read_meta_file(path: &Path) -> Result<FilingMeta> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read filing metadata from '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "Failed to parse filing metadata in '{}'. Expected a JSON object matching FilingMeta.",
            path.display()
        )
    })
}

/// Builds the [`FilingMeta`] the pipeline needs from an explicit file,
/// auto-discovered file, and/or individual flag overrides.
///
/// # Errors
///
/// Returns an error if an explicit `--meta` file is unreadable or malformed,
/// or if no file was found/given and one of the required fields is missing
/// from the flags.
pub fn load_filing_meta(args: FilingMetaArgs) -> Result<FilingMeta> {
    let base = match &args.meta {
        Some(path) => Some(read_meta_file(path)?),
        None => discover(DISCOVERY_FILENAME).map(|path| read_meta_file(&path)).transpose()?,
    };

    match base {
        Some(mut meta) => {
            if let Some(company) = args.company {
                meta.company = company;
            }
            if let Some(ticker) = args.ticker {
                meta.ticker = ticker;
            }
            if let Some(period_of_report) = args.period_of_report {
                meta.period_of_report = period_of_report;
            }
            if let Some(filing_date) = args.filing_date {
                meta.filing_date = parse_date(&filing_date)?;
            }
            if let Some(year) = args.year {
                meta.year = year;
            }
            if let Some(filing_url) = args.filing_url {
                meta.filing_url = filing_url;
            }
            Ok(meta)
        }
        None => build_from_flags(args),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid filing date '{}'. Expected YYYY-MM-DD.", s))
}

fn build_from_flags(args: FilingMetaArgs) -> Result<FilingMeta> {
    let mut missing = Vec::new();
    if args.company.is_none() {
        missing.push("--company");
    }
    if args.ticker.is_none() {
        missing.push("--ticker");
    }
    if args.period_of_report.is_none() {
        missing.push("--period-of-report");
    }
    if args.filing_date.is_none() {
        missing.push("--filing-date");
    }
    if args.year.is_none() {
        missing.push("--year");
    }
    if args.filing_url.is_none() {
        missing.push("--filing-url");
    }
    if !missing.is_empty() {
        anyhow::bail!(
            "No filing metadata file found or given; the following flags are required: {}",
            missing.join(", ")
        );
    }

    Ok(FilingMeta {
        company: args.company.unwrap(),
        ticker: args.ticker.unwrap(),
        form: FilingForm::TenK,
        period_of_report: args.period_of_report.unwrap(),
        filing_date: parse_date(&args.filing_date.unwrap())?,
        year: args.year.unwrap(),
        filing_url: args.filing_url.unwrap(),
    })
}
