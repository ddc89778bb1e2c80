//! Document-level chunking: regroups an enriched node stream by item and
//! assigns the global chunk order.

use std::collections::HashMap;

use crate::cancel::CancellationToken;
use crate::chunk_accumulator::chunk_item_view;
use crate::config::config_for;
use crate::error::TenKError;
use crate::items::ItemName;
use crate::config::ItemChunkingConfig;
use crate::semantic_document::SemanticDocument;
use crate::types::{Chunk, StructuralNode};

/// Runs the Chunk Accumulator over every item in document order, then stamps
/// a document-wide `order` across the concatenated result (item order follows
/// TOC discovery order, since nodes are already in document order).
pub fn chunk_document(
    nodes: &[StructuralNode],
    cfg_table: &HashMap<ItemName, ItemChunkingConfig>,
    cancel: &CancellationToken,
) -> Result<Vec<Chunk>, TenKError> {
    let doc = SemanticDocument::new(nodes);
    let mut chunks = Vec::new();

    for view in doc.iter() {
        if cancel.is_cancelled() {
            return Err(TenKError::Cancelled);
        }
        let cfg = config_for(cfg_table, view.item);
        chunks.extend(chunk_item_view(&view, cfg, cancel)?);
    }

    for (order, chunk) in chunks.iter_mut().enumerate() {
        chunk.metadata.order = order;
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::config::ITEMS_CHUNKING_CONFIGS;
    use crate::types::{FilingForm, FilingMeta, NodeType, StructuralNodeMetadata, TextNode};

    fn filing() -> FilingMeta {
        FilingMeta {
            company: "Acme Corp".to_string(),
            ticker: "ACME".to_string(),
            form: FilingForm::TenK,
            period_of_report: "2025-09-27".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            year: 2025,
            filing_url: "https://example.com/acme-10k.htm".to_string(),
        }
    }

    fn node(item: ItemName, text: &str) -> StructuralNode {
        StructuralNode::Text(TextNode {
            metadata: StructuralNodeMetadata::new(NodeType::Text, item, "anchor".to_string(), filing()),
            text: text.to_string(),
        })
    }

    #[test]
    fn order_is_assigned_globally_across_items() {
        let nodes = vec![node(ItemName::Item1, "a"), node(ItemName::Item7, "b")];
        let chunks = chunk_document(&nodes, &ITEMS_CHUNKING_CONFIGS, &CancellationToken::new()).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].metadata.order, 0);
        assert_eq!(chunks[1].metadata.order, 1);
    }

    #[test]
    fn cancellation_between_items_aborts_the_whole_call() {
        let nodes = vec![node(ItemName::Item1, "a"), node(ItemName::Item7, "b")];
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(
            chunk_document(&nodes, &ITEMS_CHUNKING_CONFIGS, &token),
            Err(TenKError::Cancelled)
        ));
    }
}
