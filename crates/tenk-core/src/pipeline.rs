//! The crate's two public entry points, plus the `FilingFetcher` collaborator
//! contract. Everything upstream of `parse_filing` (classifier, TOC resolver,
//! node extractor, table reconstructor, metadata enricher) and downstream of
//! it (chunk accumulator, chunker) is wired together here.

use std::collections::HashMap;

use scraper::Html;

use crate::cancel::CancellationToken;
use crate::chunker;
use crate::config::ItemChunkingConfig;
use crate::enrich;
use crate::error::TenKError;
use crate::extractor;
use crate::items::ItemName;
use crate::toc;
use crate::types::{Chunk, FilingMeta, StructuralNode};

/// Parses one filing's HTML into an enriched, document-ordered node stream:
/// resolves the table of contents, walks each item's sibling range, then
/// back-fills page numbers and drops footer/non-content nodes.
pub fn parse_filing(html: &str, filing_meta: FilingMeta) -> Result<Vec<StructuralNode>, TenKError> {
    parse_filing_cancellable(html, filing_meta, &CancellationToken::new())
}

/// As [`parse_filing`], observing `cancel` between items (the design's first
/// cooperative-cancellation checkpoint).
pub fn parse_filing_cancellable(html: &str, filing_meta: FilingMeta, cancel: &CancellationToken) -> Result<Vec<StructuralNode>, TenKError> {
    let doc = Html::parse_document(html);
    let items = toc::resolve_toc(&doc)?;
    let raw = extractor::extract_filing(&items, &filing_meta, cancel)?;
    Ok(enrich::enrich(raw))
}

/// Regroups an enriched node stream into word-budgeted, overlap-wired chunks,
/// one `ItemChunkingConfig` per item (falling back to the process-wide default
/// for any item absent from `cfg_table`).
pub fn chunk_document(nodes: &[StructuralNode], cfg_table: &HashMap<ItemName, ItemChunkingConfig>) -> Result<Vec<Chunk>, TenKError> {
    chunk_document_cancellable(nodes, cfg_table, &CancellationToken::new())
}

/// As [`chunk_document`], observing `cancel` between chunks (the design's
/// second cooperative-cancellation checkpoint).
pub fn chunk_document_cancellable(
    nodes: &[StructuralNode],
    cfg_table: &HashMap<ItemName, ItemChunkingConfig>,
    cancel: &CancellationToken,
) -> Result<Vec<Chunk>, TenKError> {
    chunker::chunk_document(nodes, cfg_table, cancel)
}

/// External collaborator that resolves `(ticker, year)` to filing HTML and its
/// metadata. The only I/O-bound step in the pipeline; invoked once per filing
/// before parsing begins.
#[async_trait::async_trait]
pub trait FilingFetcher: Send + Sync {
    async fn fetch(&self, ticker: &str, year: i32) -> Result<(String, FilingMeta), TenKError>;
}
