//! HTML Classifier: decides what kind of [`NodeType`] a DOM element represents.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Node;

use crate::dom::{count_descendant_tag, element_text};
use crate::error::MultipleMatches;
use crate::types::NodeType;

/// `"Apple Inc. | 2025 Form 10-K | 17"` -> year 2025, page 17.
static PAGE_FOOTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*.+?\s*\|\s*(\d{4})\s+Form\s+10-K\s*\|\s*(\d+)\s*$").expect("valid regex"));

/// Outcome of classification: the node type plus any data the caller needs to
/// avoid recomputing it (collapsed text, and — for page footers — the captured
/// year/page groups).
#[derive(Debug, Clone)]
pub struct Classification {
    pub node_type: NodeType,
    pub text: String,
    pub footer_page_number: Option<u32>,
}

/// Classifies a single DOM element, examining only the element itself (never
/// its siblings). Returns [`MultipleMatches`] when zero or more than one of the
/// five predicates hold; the caller (node extractor) then recurses into the
/// element's children instead of emitting a node for it.
pub fn classify(node: NodeRef<'_, Node>) -> Result<Classification, MultipleMatches> {
    let table_count = count_descendant_tag(node, "table");
    let image_count = count_descendant_tag(node, "img");
    let text = element_text(node);

    let footer_captures = PAGE_FOOTER_PATTERN.captures(&text);
    let is_page_footer = footer_captures.is_some();
    let is_table = table_count == 1;
    let is_image = image_count == 1;
    // "no table"/"no image" here means none at all, not "not exactly one" — a
    // node straddling two tables is neither is_table nor is_non_content nor
    // is_text, which is exactly what forces it back through recursion.
    let no_table_or_image = table_count == 0 && image_count == 0;
    let is_non_content = text.is_empty() && no_table_or_image && !is_page_footer;
    let is_text = no_table_or_image && !is_page_footer && !text.is_empty();

    let matches = [is_table, is_image, is_page_footer, is_non_content, is_text]
        .iter()
        .filter(|b| **b)
        .count();

    if matches != 1 {
        return Err(MultipleMatches { matches });
    }

    let node_type = if is_table {
        NodeType::Table
    } else if is_image {
        NodeType::Image
    } else if is_page_footer {
        NodeType::PageFooter
    } else if is_non_content {
        NodeType::NonContent
    } else {
        NodeType::Text
    };

    let footer_page_number = footer_captures.and_then(|c| c.get(2)).and_then(|m| m.as_str().parse().ok());

    Ok(Classification {
        node_type,
        text,
        footer_page_number,
    })
}
