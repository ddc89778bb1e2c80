//! Chunks: word-budgeted bundles of structural node text, the unit handed to the
//! downstream embedder.

use serde::{Deserialize, Serialize};

use super::filing::FilingMeta;
use crate::items::ItemName;

/// Chunk classification. Only `Regular` exists today; the variant is kept so a
/// future distinction (e.g. table-only chunks) does not require a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Regular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub chunk_type: ChunkType,
    pub item: ItemName,
    pub item_anchor: String,
    pub item_title: String,
    pub item_description: String,
    /// Sorted, deduplicated page numbers of nodes contained in the chunk.
    pub page_numbers: Vec<u32>,
    /// `(min, max)` of `page_numbers`; always a tuple even for a single page.
    /// `None` only when the chunk has no paginated nodes at all.
    pub page_range: Option<(u32, u32)>,
    /// Node ids of tables referenced by this chunk, either contained or reached
    /// through a neighbor overlap. First-seen order preserved.
    pub table_references: Vec<String>,
    /// Node ids of images referenced by this chunk; same rules as `table_references`.
    pub image_references: Vec<String>,
    /// Node ids of nodes actually contained in this chunk (excludes overlap-only
    /// references).
    pub structural_node_ids: Vec<String>,
    /// Global position across the whole document, assigned after all items'
    /// chunks are produced.
    pub order: usize,
    #[serde(flatten)]
    pub filing: FilingMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// `<ItemName>_<idx>_<8-hex>`, e.g. `Item_7_3_a1b2c3d4`.
    pub id: String,
    pub content: String,
    pub metadata: ChunkMetadata,
}
