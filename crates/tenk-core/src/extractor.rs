//! Node Extractor: walks the sibling range `[start_el, end_el)` of each item,
//! classifying and emitting typed [`StructuralNode`]s, recursing into children
//! whenever an element can't be classified cleanly.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use crate::cancel::CancellationToken;
use crate::classifier::{Classification, classify};
use crate::dom::{child_elements, find_descendant_tag};
use crate::error::TenKError;
use crate::items::ItemName;
use crate::table_reconstruct;
use crate::toc::ItemTocElement;
use crate::types::{
    FilingMeta, ImageNode, NodeType, NonContentNode, NonContentReason, PageFooterNode, StructuralNode,
    StructuralNodeMetadata, TableNode, TextNode,
};

/// Extracts nodes for every item, checking [`CancellationToken`] between items
/// as the design's first cooperative-cancellation checkpoint.
pub fn extract_filing(
    items: &[ItemTocElement<'_>],
    filing: &FilingMeta,
    cancel: &CancellationToken,
) -> Result<Vec<StructuralNode>, TenKError> {
    let mut nodes = Vec::new();
    for item in items {
        if cancel.is_cancelled() {
            return Err(TenKError::Cancelled);
        }
        nodes.extend(extract_item(item, filing)?);
    }
    Ok(nodes)
}

/// Walks one item's `[start_el, end_el)` sibling range: `end_el` is the next
/// item's own resolved boundary, not this item's content, so it is never
/// passed to [`extract_element`]. That means `end_el`'s own content is
/// dropped entirely — not assigned to this item, and not reachable by the
/// next item either, since that item's own walk starts at its `start_el`.
/// This is a faithful reproduction of the upstream parser's behavior, not a
/// bug: its sibling walk advances with `find_next_sibling()` under the same
/// `current_element != item.end_el` condition, checked before the element is
/// ever processed.
fn extract_item(item: &ItemTocElement<'_>, filing: &FilingMeta) -> Result<Vec<StructuralNode>, TenKError> {
    let (Some(start), Some(end)) = (item.start_el, item.end_el) else {
        tracing::debug!(item = %item.item, anchor = %item.anchor, "TOC anchor unresolved, skipping item");
        return Ok(Vec::new());
    };

    let mut nodes = Vec::new();
    let mut current = Some(start);
    while let Some(el) = current {
        if el == end {
            break;
        }
        extract_element(el, item.item, &item.anchor, filing, &mut nodes);
        current = el.next_sibling();
    }
    Ok(nodes)
}

/// Classifies `el`; on success emits one node, on [`crate::error::MultipleMatches`]
/// recurses into its element children. A childless, unclassifiable element is
/// the `ClassificationUnknown` case: logged and dropped.
fn extract_element(el: NodeRef<'_, Node>, parent_item: ItemName, anchor: &str, filing: &FilingMeta, out: &mut Vec<StructuralNode>) {
    if ElementRef::wrap(el).is_none() {
        return;
    }

    match classify(el) {
        Ok(classification) => out.push(build_node(classification, el, parent_item, anchor, filing)),
        Err(_) => {
            let mut any_child = false;
            for child in child_elements(el) {
                any_child = true;
                extract_element(child, parent_item, anchor, filing, out);
            }
            if !any_child {
                tracing::warn!(anchor, "element matched no classification predicate and has no children, dropping");
            }
        }
    }
}

fn build_node(
    classification: Classification,
    el: NodeRef<'_, Node>,
    parent_item: ItemName,
    anchor: &str,
    filing: &FilingMeta,
) -> StructuralNode {
    let metadata = StructuralNodeMetadata::new(classification.node_type, parent_item, anchor.to_string(), filing.clone());

    match classification.node_type {
        NodeType::Text => StructuralNode::Text(TextNode {
            metadata,
            text: classification.text,
        }),
        NodeType::Table => {
            let table_el = find_descendant_tag(el, "table").unwrap_or(el);
            let reconstructed = table_reconstruct::reconstruct(table_el);
            StructuralNode::Table(TableNode {
                metadata,
                dataframe: reconstructed.dataframe,
                caption: reconstructed.caption,
                table_metadata: reconstructed.table_metadata,
                table_lookup: reconstructed.table_lookup,
                text: reconstructed.text,
                min_text: reconstructed.min_text,
            })
        }
        NodeType::Image => {
            let img_el = find_descendant_tag(el, "img").unwrap_or(el);
            let img = ElementRef::wrap(img_el);
            let img_src = img.and_then(|i| i.value().attr("src")).unwrap_or_default().to_string();
            let img_alt = img.and_then(|i| i.value().attr("alt")).unwrap_or_default().to_string();

            // Spec 9: corrects the source's parenthesization ambiguity — the
            // bracket wraps the joined parts, with a fixed fallback phrase when
            // both src and alt are empty.
            let parts: Vec<&str> = [img_src.as_str(), img_alt.as_str()].into_iter().filter(|s| !s.is_empty()).collect();
            let text = if parts.is_empty() {
                "[Image content]".to_string()
            } else {
                format!("[{}]", parts.join(" "))
            };
            let min_text = text.clone();

            StructuralNode::Image(ImageNode {
                metadata,
                img_src,
                img_alt,
                text,
                min_text,
            })
        }
        NodeType::PageFooter => StructuralNode::PageFooter(PageFooterNode {
            metadata,
            page_number: classification.footer_page_number.unwrap_or(0),
        }),
        NodeType::NonContent => StructuralNode::NonContent(NonContentNode {
            metadata,
            reason: non_content_reason(el),
        }),
    }
}

fn non_content_reason(el: NodeRef<'_, Node>) -> NonContentReason {
    if find_descendant_tag(el, "hr").is_some() {
        NonContentReason::ContainsHr
    } else if child_elements(el).next().is_none() {
        NonContentReason::EmptyText
    } else {
        NonContentReason::Decorative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scraper::Html;

    use crate::toc::resolve_toc;
    use crate::types::FilingForm;

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

    const FIXTURE: &str = r#"
        <html><body>
        <div>Table of Contents</div>
        <table>
            <tr><td><a href="#item1">Item 1</a></td></tr>
            <tr><td><a href="#item7">Item 7</a></td></tr>
        </table>
        <p id="item1">Business overview text.</p>
        <div><table><tr><td>Revenue</td><td>2025</td></tr></table></div>
        <p>Extra paragraph.</p>
        <div id="item7">
            <p>MD&amp;A content here.</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_text_and_table_nodes_excluding_end_boundary() {
        let doc = Html::parse_document(FIXTURE);
        let items = resolve_toc(&doc).unwrap();
        let nodes = extract_filing(&items, &filing(), &CancellationToken::new()).unwrap();

        assert!(nodes.iter().any(|n| n.is_table()));
        assert!(nodes.iter().any(|n| matches!(n, StructuralNode::Text(t) if t.text.contains("MD&A"))));
        assert!(nodes.iter().all(|n| n.metadata().filing.ticker == "ACME"));

        // item1's end_el resolves to "Extra paragraph.", the sibling just before
        // item7's start_el. Its content belongs to neither item and never appears.
        assert!(nodes.iter().all(|n| !matches!(n, StructuralNode::Text(t) if t.text.contains("Extra paragraph"))));
    }

    #[test]
    fn cancellation_aborts_before_any_item_is_processed() {
        let doc = Html::parse_document(FIXTURE);
        let items = resolve_toc(&doc).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(extract_filing(&items, &filing(), &token), Err(TenKError::Cancelled)));
    }
}
