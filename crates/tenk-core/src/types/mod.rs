//! Core data model: filing-level metadata, structural nodes, tables, and chunks.

pub mod chunk;
pub mod filing;
pub mod node;
pub mod table;

pub use chunk::{Chunk, ChunkMetadata, ChunkType};
pub use filing::{FilingForm, FilingMeta};
pub use node::{
    ImageNode, NodeType, NonContentNode, NonContentReason, PageFooterNode, StructuralNode, StructuralNodeMetadata,
    TableNode, TextNode,
};
pub use table::{TableLookup, TableMetadata};
