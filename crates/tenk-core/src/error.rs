//! Error types for the parsing and chunking pipeline.

use thiserror::Error;

/// Errors surfaced to the caller of [`crate::pipeline::parse_filing`] and
/// [`crate::pipeline::chunk_document`].
///
/// Internal classification/decomposition failures (`MultipleMatches`,
/// `ClassificationUnknown`) never reach this type — they are handled inside
/// the node extractor per the error handling policy.
#[derive(Debug, Error)]
pub enum TenKError {
    /// The external `FilingFetcher` found no 10-K for the requested `(ticker, year)`.
    #[error("no 10-K filing found for {ticker} {year}")]
    FilingNotFound { ticker: String, year: i32 },

    /// No table of contents could be resolved via any of the three search tiers.
    #[error("table of contents not found")]
    TocNotFound,

    /// A TOC anchor did not resolve to a matching element. Recorded at debug level by
    /// the caller; the affected item is skipped rather than failing the whole filing.
    #[error("anchor '{anchor}' for {item} could not be resolved")]
    AnchorUnresolved { item: String, anchor: String },

    /// Cooperative cancellation observed at an item or chunk boundary. Partial
    /// results are discarded; the operation is not resumable.
    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, TenKError>;

/// Internal-only failure from [`crate::classifier::classify`]: the element matched
/// zero or more than one classification predicate and must be decomposed into
/// its children by the node extractor.
#[derive(Debug, Error)]
#[error("element matched {matches} classification predicates, expected exactly 1")]
pub struct MultipleMatches {
    pub matches: usize,
}
