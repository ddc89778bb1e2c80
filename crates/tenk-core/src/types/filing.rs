//! Filing-level metadata, immutable for the lifetime of one parse session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// SEC form type. Currently only `10-K` is supported by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilingForm {
    #[serde(rename = "10-K")]
    TenK,
}

impl std::fmt::Display for FilingForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingForm::TenK => write!(f, "10-K"),
        }
    }
}

/// Filing-level metadata supplied by the external `FilingFetcher`.
///
/// Immutable for a parse session: stamped verbatim into every
/// [`crate::types::StructuralNodeMetadata`] and every [`crate::types::ChunkMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMeta {
    pub company: String,
    pub ticker: String,
    pub form: FilingForm,
    /// Date string as reported by the filer (e.g. `"2025-09-27"`); not necessarily a
    /// calendar year boundary, so it is kept as a string rather than parsed further.
    pub period_of_report: String,
    pub filing_date: NaiveDate,
    pub year: i32,
    pub filing_url: String,
}
