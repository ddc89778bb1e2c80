//! `tenk-core`: HTML Classifier -> TOC Resolver -> Node Extractor -> Table
//! Reconstructor -> Metadata Enricher -> Chunk Accumulator, wired together by
//! [`pipeline::parse_filing`] and [`pipeline::chunk_document`].
//!
//! Filing retrieval, vector embedding/storage, the question-answering agent,
//! and the CLI layer on top of this crate are out of scope — see
//! [`pipeline::FilingFetcher`] for the one external collaborator contract this
//! crate depends on.

pub mod cancel;
pub mod chunk_accumulator;
pub mod chunker;
pub mod classifier;
pub mod config;
pub mod dom;
pub mod enrich;
pub mod error;
pub mod extractor;
pub mod items;
pub mod pipeline;
pub mod semantic_document;
pub mod table_reconstruct;
pub mod toc;
pub mod types;

pub use cancel::CancellationToken;
pub use config::{ITEMS_CHUNKING_CONFIGS, ItemChunkingConfig};
pub use error::{Result, TenKError};
pub use items::{ITEMS, ItemInfo, ItemName};
pub use pipeline::{FilingFetcher, chunk_document, chunk_document_cancellable, parse_filing, parse_filing_cancellable};
pub use semantic_document::{ItemView, SemanticDocument};
pub use types::{
    Chunk, ChunkMetadata, ChunkType, FilingForm, FilingMeta, ImageNode, NodeType, NonContentNode, NonContentReason,
    PageFooterNode, StructuralNode, StructuralNodeMetadata, TableLookup, TableMetadata, TableNode, TextNode,
};
