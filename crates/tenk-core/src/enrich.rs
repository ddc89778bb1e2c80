//! Metadata Enricher: back-fills page numbers, drops footer/non-content
//! nodes, and assigns a gap-free `structural_order`.

use crate::types::StructuralNode;

/// Runs all four enrichment steps over one filing's raw node stream, returning
/// only the `text`/`table`/`image` nodes that survive into the pipeline's
/// public result.
pub fn enrich(nodes: Vec<StructuralNode>) -> Vec<StructuralNode> {
    let nodes = backfill_page_numbers(nodes);
    let mut nodes: Vec<StructuralNode> = nodes
        .into_iter()
        .filter(|n| !matches!(n, StructuralNode::PageFooter(_) | StructuralNode::NonContent(_)))
        .collect();
    renumber(&mut nodes);
    nodes
}

/// For each non-footer node, stamps `page_number` with the first
/// `PageFooterNode.page_number` found at or after its position; footer nodes
/// already carry their own.
fn backfill_page_numbers(mut nodes: Vec<StructuralNode>) -> Vec<StructuralNode> {
    let mut next_page: Option<u32> = None;
    for node in nodes.iter_mut().rev() {
        match node {
            StructuralNode::PageFooter(footer) => {
                next_page = Some(footer.page_number);
                node.metadata_mut().page_number = Some(footer.page_number);
            }
            _ => node.metadata_mut().page_number = next_page,
        }
    }
    nodes
}

fn renumber(nodes: &mut [StructuralNode]) {
    for (order, node) in nodes.iter_mut().enumerate() {
        node.metadata_mut().structural_order = Some(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::items::ItemName;
    use crate::types::{FilingForm, FilingMeta, NodeType, NonContentNode, NonContentReason, PageFooterNode, StructuralNodeMetadata, TextNode};

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

    fn text_node(text: &str) -> StructuralNode {
        StructuralNode::Text(TextNode {
            metadata: StructuralNodeMetadata::new(NodeType::Text, ItemName::Item7, "item7".to_string(), filing()),
            text: text.to_string(),
        })
    }

    fn footer_node(page: u32) -> StructuralNode {
        StructuralNode::PageFooter(PageFooterNode {
            metadata: StructuralNodeMetadata::new(NodeType::PageFooter, ItemName::Item7, "item7".to_string(), filing()),
            page_number: page,
        })
    }

    fn non_content_node() -> StructuralNode {
        StructuralNode::NonContent(NonContentNode {
            metadata: StructuralNodeMetadata::new(NodeType::NonContent, ItemName::Item7, "item7".to_string(), filing()),
            reason: NonContentReason::EmptyText,
        })
    }

    #[test]
    fn backfills_page_number_from_next_footer() {
        let nodes = vec![text_node("a"), text_node("b"), footer_node(12)];
        let enriched = enrich(nodes);
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].metadata().page_number, Some(12));
        assert_eq!(enriched[1].metadata().page_number, Some(12));
    }

    #[test]
    fn drops_footer_and_non_content_and_renumbers_without_gaps() {
        let nodes = vec![text_node("a"), non_content_node(), footer_node(1), text_node("b")];
        let enriched = enrich(nodes);
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].metadata().structural_order, Some(0));
        assert_eq!(enriched[1].metadata().structural_order, Some(1));
    }

    #[test]
    fn trailing_node_with_no_subsequent_footer_has_no_page_number() {
        let nodes = vec![footer_node(3), text_node("a")];
        let enriched = enrich(nodes);
        assert_eq!(enriched[0].metadata().page_number, None);
    }
}
