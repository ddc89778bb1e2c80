//! Structural nodes: the typed, addressable units emitted by the node extractor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filing::FilingMeta;
use crate::items::ItemName;

/// Discriminator used by the classifier and carried on every [`StructuralNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Text,
    Table,
    Image,
    PageFooter,
    NonContent,
}

/// Why a [`NonContentNode`] was classified as non-content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonContentReason {
    ContainsHr,
    EmptyText,
    Decorative,
}

/// Fields common to every structural node, including the full filing stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralNodeMetadata {
    pub parent_item: ItemName,
    pub item_anchor: String,
    /// Backfilled by the metadata enricher from the next `page_footer` node at or
    /// after this node's position; `None` only transiently, before enrichment runs.
    pub page_number: Option<u32>,
    /// Gap-free position assigned after enrichment filters page_footer/non_content
    /// nodes; `None` until that pass runs.
    pub structural_order: Option<usize>,
    /// Unique id of the form `<type>_<12-hex>`.
    pub structural_node_id: String,
    #[serde(flatten)]
    pub filing: FilingMeta,
}

impl StructuralNodeMetadata {
    pub fn new(node_type: NodeType, parent_item: ItemName, item_anchor: String, filing: FilingMeta) -> Self {
        let tag = match node_type {
            NodeType::Text => "text",
            NodeType::Table => "table",
            NodeType::Image => "image",
            NodeType::PageFooter => "page_footer",
            NodeType::NonContent => "non_content",
        };
        let hex = Uuid::new_v4().simple().to_string();
        StructuralNodeMetadata {
            parent_item,
            item_anchor,
            page_number: None,
            structural_order: None,
            structural_node_id: format!("{tag}_{}", &hex[..12]),
            filing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub metadata: StructuralNodeMetadata,
    /// Whitespace-collapsed visible text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    pub metadata: StructuralNodeMetadata,
    /// Reconstructed grid, header row first, one row per source `<tr>`.
    pub dataframe: Vec<Vec<String>>,
    pub caption: Option<String>,
    pub table_metadata: super::table::TableMetadata,
    pub table_lookup: super::table::TableLookup,
    /// Verbose line-per-cell text, suitable as standalone chunk content.
    pub text: String,
    /// Compact structural summary, used as overlap content instead of `text`.
    pub min_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    pub metadata: StructuralNodeMetadata,
    pub img_src: String,
    pub img_alt: String,
    pub text: String,
    pub min_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFooterNode {
    pub metadata: StructuralNodeMetadata,
    /// Parsed from the footer text pattern; always `Some` by construction.
    pub page_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonContentNode {
    pub metadata: StructuralNodeMetadata,
    pub reason: NonContentReason,
}

/// A typed structural node. The node extractor emits all five variants; the
/// metadata enricher then drops `PageFooter` and `NonContent` so that only
/// `Text`, `Table`, and `Image` survive into [`crate::pipeline::parse_filing`]'s
/// return value and everything downstream of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "snake_case")]
pub enum StructuralNode {
    Text(TextNode),
    Table(TableNode),
    Image(ImageNode),
    PageFooter(PageFooterNode),
    NonContent(NonContentNode),
}

impl StructuralNode {
    pub fn node_type(&self) -> NodeType {
        match self {
            StructuralNode::Text(_) => NodeType::Text,
            StructuralNode::Table(_) => NodeType::Table,
            StructuralNode::Image(_) => NodeType::Image,
            StructuralNode::PageFooter(_) => NodeType::PageFooter,
            StructuralNode::NonContent(_) => NodeType::NonContent,
        }
    }

    pub fn metadata(&self) -> &StructuralNodeMetadata {
        match self {
            StructuralNode::Text(n) => &n.metadata,
            StructuralNode::Table(n) => &n.metadata,
            StructuralNode::Image(n) => &n.metadata,
            StructuralNode::PageFooter(n) => &n.metadata,
            StructuralNode::NonContent(n) => &n.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut StructuralNodeMetadata {
        match self {
            StructuralNode::Text(n) => &mut n.metadata,
            StructuralNode::Table(n) => &mut n.metadata,
            StructuralNode::Image(n) => &mut n.metadata,
            StructuralNode::PageFooter(n) => &mut n.metadata,
            StructuralNode::NonContent(n) => &mut n.metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.metadata().structural_node_id
    }

    /// The node's verbose text, as used by the chunk accumulator's word-budget
    /// accounting. `None` for page footer and non-content nodes, which never
    /// reach the chunk accumulator.
    pub fn text(&self) -> Option<&str> {
        match self {
            StructuralNode::Text(n) => Some(&n.text),
            StructuralNode::Table(n) => Some(&n.text),
            StructuralNode::Image(n) => Some(&n.text),
            StructuralNode::PageFooter(_) | StructuralNode::NonContent(_) => None,
        }
    }

    /// Compact overlap-only text; only tables and images have a distinct `min_text`.
    pub fn min_text(&self) -> Option<&str> {
        match self {
            StructuralNode::Table(n) => Some(&n.min_text),
            StructuralNode::Image(n) => Some(&n.min_text),
            _ => None,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, StructuralNode::Table(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, StructuralNode::Image(_))
    }
}
