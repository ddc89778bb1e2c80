//! TOC Resolver: locates the table of contents and resolves each item to a
//! `[start_el, end_el)` sibling range.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::dom::{DocOrder, direct_text};
use crate::error::TenKError;
use crate::items::ItemName;

static ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^item\s+(\d+[A-Za-z]?)").expect("valid regex"));

const BLOCK_TAGS: &[&str] = &[
    "div", "p", "td", "tr", "table", "body", "section", "article", "li", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// `ItemInfo` plus the TOC-derived fields: `anchor`, `link_text`, and the
/// resolved `[start_el, end_el)` range. `start_el`/`end_el` are `None` when
/// resolution failed for that item (logged, not fatal — see
/// [`crate::error::TenKError::AnchorUnresolved`]).
#[derive(Debug, Clone)]
pub struct ItemTocElement<'a> {
    pub item: ItemName,
    pub anchor: String,
    pub link_text: String,
    pub start_el: Option<NodeRef<'a, Node>>,
    pub end_el: Option<NodeRef<'a, Node>>,
}

/// Resolves the TOC and every item's start/end range for one parsed document.
pub fn resolve_toc(doc: &Html) -> Result<Vec<ItemTocElement<'_>>, TenKError> {
    let order = DocOrder::build(doc);
    let toc_table = find_toc_table(doc, &order).ok_or(TenKError::TocNotFound)?;

    let mut items = collect_toc_items(doc, toc_table);
    resolve_start_elements(doc, &mut items);
    resolve_end_elements(doc, &mut items, &order);
    Ok(items)
}

/// Three-tier search for the TOC `<table>` element.
fn find_toc_table<'a>(doc: &'a Html, order: &DocOrder) -> Option<NodeRef<'a, Node>> {
    find_toc_by_heading(doc, order, false)
        .or_else(|| find_toc_by_heading(doc, order, true))
        .or_else(|| find_toc_by_anchor_density(doc))
}

/// Tier 1 (`narrow_tags = false`): any element whose own direct text contains
/// "table of contents". Tier 2 (`narrow_tags = true`): same, but restricted to
/// `span|div|p` elements whose direct text exactly equals the phrase.
fn find_toc_by_heading<'a>(doc: &'a Html, order: &DocOrder, narrow_tags: bool) -> Option<NodeRef<'a, Node>> {
    let all = Selector::parse("*").unwrap();
    let heading = doc.select(&all).find(|el| {
        let tag_ok = !narrow_tags || matches!(el.value().name(), "span" | "div" | "p");
        if !tag_ok {
            return false;
        }
        let text = direct_text(**el).to_ascii_lowercase();
        if narrow_tags {
            text == "table of contents"
        } else {
            text.contains("table of contents")
        }
    })?;

    let block_ancestor = heading
        .ancestors()
        .chain(std::iter::once(*heading))
        .find(|n| matches!(n.value(), Node::Element(e) if BLOCK_TAGS.contains(&e.name())))
        .unwrap_or(*heading);

    let table_sel = Selector::parse("table").unwrap();
    doc.select(&table_sel)
        .map(|t| *t)
        .find(|t| order.is_before(block_ancestor, *t))
}

/// Tier 3: the `<table>` with the most anchors whose text matches
/// `Item\s+\d+[A-Z]?`, provided that count is at least 5.
fn find_toc_by_anchor_density(doc: &Html) -> Option<NodeRef<'_, Node>> {
    let table_sel = Selector::parse("table").unwrap();
    let anchor_sel = Selector::parse("a").unwrap();

    doc.select(&table_sel)
        .map(|table| {
            let count = table
                .select(&anchor_sel)
                .filter(|a| ITEM_PATTERN.is_match(a.text().collect::<String>().trim()))
                .count();
            (table, count)
        })
        .filter(|(_, count)| *count >= 5)
        .max_by_key(|(_, count)| *count)
        .map(|(table, _)| *table)
}

/// Collects `(ItemName, anchor, link_text)` triples from anchors inside the TOC
/// table, in document order, keeping only anchors that parse as a known item.
fn collect_toc_items(doc: &Html, toc_table: NodeRef<'_, Node>) -> Vec<ItemTocElement<'_>> {
    let Some(table_el) = ElementRef::wrap(toc_table) else {
        return Vec::new();
    };
    let anchor_sel = Selector::parse("a").unwrap();

    table_el
        .select(&anchor_sel)
        .filter_map(|a| {
            let link_text = a.text().collect::<String>().trim().to_string();
            let caps = ITEM_PATTERN.captures(&link_text)?;
            let key = caps.get(1)?.as_str().to_ascii_uppercase();
            let item = ItemName::from_key(&key)?;
            let href = a.value().attr("href")?;
            let anchor = href.trim_start_matches('#').to_string();
            Some(ItemTocElement {
                item,
                anchor,
                link_text,
                start_el: None,
                end_el: None,
            })
        })
        .collect()
}

/// Resolves `start_el` for each item: the element whose `id` equals the anchor,
/// or (failing that) an `<a name="anchor">` element.
fn resolve_start_elements<'a>(doc: &'a Html, items: &mut [ItemTocElement<'a>]) {
    let all = Selector::parse("*").unwrap();
    for item in items.iter_mut() {
        item.start_el = doc
            .select(&all)
            .find(|el| el.value().attr("id") == Some(item.anchor.as_str()))
            .map(|el| *el)
            .or_else(|| {
                doc.select(&all)
                    .find(|el| el.value().name() == "a" && el.value().attr("name") == Some(item.anchor.as_str()))
                    .map(|el| *el)
            });
    }
}

/// Resolves `end_el` for each item as the previous sibling of the next item's
/// `start_el` (falling back to that next item's parent), probing ahead through
/// unresolved items when necessary. The last item's `end_el` is the last
/// `{div, table, p}` element in the document, or the `<body>` as a final
/// fallback.
fn resolve_end_elements<'a>(doc: &'a Html, items: &mut [ItemTocElement<'a>], order: &DocOrder) {
    let n = items.len();
    for i in 0..n {
        let mut end_el = None;
        for next in items.iter().skip(i + 1) {
            if let Some(next_start) = next.start_el {
                end_el = Some(next_start.prev_sibling().unwrap_or_else(|| {
                    next_start.parent().expect("DOM nodes other than the document root have a parent")
                }));
                break;
            }
        }
        items[i].end_el = end_el.or_else(|| last_item_end(doc, order));
    }
}

/// The last `{div, table, p}` element in document order, falling back to `<body>`.
fn last_item_end(doc: &Html, order: &DocOrder) -> Option<NodeRef<'_, Node>> {
    let sel = Selector::parse("div, table, p").unwrap();
    doc.select(&sel)
        .map(|el| *el)
        .max_by_key(|el| order.position(el.id()))
        .or_else(|| {
            Selector::parse("body")
                .ok()
                .and_then(|body_sel| doc.select(&body_sel).next())
                .map(|el| *el)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
        <div>Table of Contents</div>
        <table>
            <tr><td><a href="#item1">Item 1</a></td><td>Business</td></tr>
            <tr><td><a href="#item1a">Item 1A</a></td><td>Risk Factors</td></tr>
            <tr><td><a href="#item7">Item 7</a></td><td>MD&amp;A</td></tr>
        </table>
        <div id="item1">
            <p>Business content.</p>
            <div id="item1a">
                <p>Risk factor content.</p>
            </div>
            <div id="item7">
                <p>MD&amp;A content.</p>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn resolves_items_in_document_order() {
        let doc = Html::parse_document(FIXTURE);
        let items = resolve_toc(&doc).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].item, ItemName::Item1);
        assert_eq!(items[1].item, ItemName::Item1A);
        assert_eq!(items[2].item, ItemName::Item7);
        assert!(items.iter().all(|it| it.start_el.is_some()));
    }

    #[test]
    fn last_item_end_falls_back_to_last_block_element() {
        let doc = Html::parse_document(FIXTURE);
        let items = resolve_toc(&doc).unwrap();
        assert!(items[2].end_el.is_some());
    }

    #[test]
    fn missing_toc_table_is_an_error() {
        let doc = Html::parse_document("<html><body><p>No contents here.</p></body></html>");
        assert!(matches!(resolve_toc(&doc), Err(TenKError::TocNotFound)));
    }
}
