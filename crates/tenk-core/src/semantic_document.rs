//! Semantic Document: a lazy, per-item view over the filtered node stream.

use crate::items::ItemName;
use crate::types::StructuralNode;

/// The contiguous run of nodes sharing one `parent_item`.
#[derive(Debug, Clone, Copy)]
pub struct ItemView<'a> {
    pub item: ItemName,
    pub nodes: &'a [StructuralNode],
}

/// A view over an enriched node slice. Holds no state of its own, so it is
/// safe to iterate more than once.
#[derive(Debug, Clone, Copy)]
pub struct SemanticDocument<'a> {
    nodes: &'a [StructuralNode],
}

impl<'a> SemanticDocument<'a> {
    pub fn new(nodes: &'a [StructuralNode]) -> Self {
        SemanticDocument { nodes }
    }

    /// One `ItemView` per maximal contiguous run of equal `parent_item`.
    pub fn iter(&self) -> impl Iterator<Item = ItemView<'a>> {
        let nodes = self.nodes;
        let mut groups = Vec::new();
        let mut i = 0;
        while i < nodes.len() {
            let item = nodes[i].metadata().parent_item;
            let mut j = i;
            while j + 1 < nodes.len() && nodes[j + 1].metadata().parent_item == item {
                j += 1;
            }
            groups.push(ItemView { item, nodes: &nodes[i..=j] });
            i = j + 1;
        }
        groups.into_iter()
    }

    /// Linear scan for the run belonging to `item`.
    pub fn get_item(&self, item: ItemName) -> Option<ItemView<'a>> {
        self.iter().find(|view| view.item == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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

    fn node(item: ItemName) -> StructuralNode {
        StructuralNode::Text(TextNode {
            metadata: StructuralNodeMetadata::new(NodeType::Text, item, "anchor".to_string(), filing()),
            text: "x".to_string(),
        })
    }

    #[test]
    fn groups_contiguous_runs_by_item() {
        let nodes = vec![node(ItemName::Item1), node(ItemName::Item1), node(ItemName::Item7)];
        let doc = SemanticDocument::new(&nodes);
        let views: Vec<_> = doc.iter().collect();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].item, ItemName::Item1);
        assert_eq!(views[0].nodes.len(), 2);
        assert_eq!(views[1].item, ItemName::Item7);
    }

    #[test]
    fn get_item_finds_the_matching_run() {
        let nodes = vec![node(ItemName::Item1), node(ItemName::Item7)];
        let doc = SemanticDocument::new(&nodes);
        assert!(doc.get_item(ItemName::Item7).is_some());
        assert!(doc.get_item(ItemName::Item9).is_none());
    }

    #[test]
    fn iterating_twice_yields_the_same_result() {
        let nodes = vec![node(ItemName::Item1)];
        let doc = SemanticDocument::new(&nodes);
        assert_eq!(doc.iter().count(), doc.iter().count());
    }
}
