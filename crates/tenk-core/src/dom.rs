//! Shared DOM helpers built on `scraper`/`ego-tree`. The rest of the crate treats
//! `NodeRef<'_, Node>` as the canonical element handle, wrapping it with
//! `ElementRef::wrap` only where element-specific operations (attributes, tag
//! name) are needed — this matches how the DOM is walked across the classifier,
//! TOC resolver, and node extractor.

use std::collections::HashMap;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// Collapses runs of whitespace (including newlines) into single spaces and trims
/// the ends, matching `get_text(separator=" ", strip=True)` semantics.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All visible text under `node`, whitespace-collapsed.
pub fn element_text(node: NodeRef<'_, Node>) -> String {
    match ElementRef::wrap(node) {
        Some(el) => collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")),
        None => String::new(),
    }
}

/// Counts descendant elements (including `node` itself) with tag name `tag`.
pub fn count_descendant_tag(node: NodeRef<'_, Node>, tag: &str) -> usize {
    match ElementRef::wrap(node) {
        Some(el) => el
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|d| d.value().name() == tag)
            .count(),
        None => 0,
    }
}

/// True if `node` is an element with tag name `tag`.
pub fn is_tag(node: NodeRef<'_, Node>, tag: &str) -> bool {
    ElementRef::wrap(node).is_some_and(|el| el.value().name() == tag)
}

/// The element's own tag name, if it is an element.
pub fn tag_name(node: NodeRef<'_, Node>) -> Option<&str> {
    ElementRef::wrap(node).map(|el| el.value().name())
}

/// True if any descendant (including `node` itself) is bolded: a `<b>`/`<strong>`
/// element, or an inline `style` containing `font-weight` of `700` or `bold`.
pub fn has_bold_descendant(node: NodeRef<'_, Node>) -> bool {
    let Some(el) = ElementRef::wrap(node) else {
        return false;
    };
    el.descendants().filter_map(ElementRef::wrap).any(|d| {
        let name = d.value().name();
        if name == "b" || name == "strong" {
            return true;
        }
        d.value()
            .attr("style")
            .map(|style| is_bold_style(style))
            .unwrap_or(false)
    })
}

fn is_bold_style(style: &str) -> bool {
    style
        .to_ascii_lowercase()
        .replace(' ', "")
        .contains("font-weight:700")
        || style.to_ascii_lowercase().replace(' ', "").contains("font-weight:bold")
}

/// Text from `node`'s immediate `Text` children only, whitespace-collapsed. Unlike
/// [`element_text`], does not recurse into child elements — used to match a TOC
/// heading without accidentally matching a page-sized ancestor that merely
/// contains that heading somewhere inside it.
pub fn direct_text(node: NodeRef<'_, Node>) -> String {
    let mut parts = Vec::new();
    for child in node.children() {
        if let Node::Text(t) = child.value() {
            parts.push(t.text.as_ref());
        }
    }
    collapse_whitespace(&parts.join(" "))
}

/// Maps every node in the document to its pre-order traversal index, giving a
/// total order usable for "next element after X" queries.
pub struct DocOrder {
    index: HashMap<ego_tree::NodeId, usize>,
}

impl DocOrder {
    pub fn build(doc: &scraper::Html) -> Self {
        let index = doc.tree.root().descendants().enumerate().map(|(i, n)| (n.id(), i)).collect();
        DocOrder { index }
    }

    pub fn position(&self, id: ego_tree::NodeId) -> usize {
        *self.index.get(&id).unwrap_or(&usize::MAX)
    }

    pub fn is_before(&self, a: NodeRef<'_, Node>, b: NodeRef<'_, Node>) -> bool {
        self.position(a.id()) < self.position(b.id())
    }
}

/// Direct element children of `node` (skipping text/comment children), in
/// document order.
pub fn child_elements(node: NodeRef<'_, Node>) -> impl Iterator<Item = NodeRef<'_, Node>> {
    node.children().filter(|c| c.value().is_element())
}

/// Rows (`<tr>`) directly or indirectly under `table`, found via `thead`/`tbody`
/// as well as bare `<tr>` children, in document order and without descending
/// into a nested `<table>` (there is never one, by the classifier's invariant).
pub fn table_rows(table: NodeRef<'_, Node>) -> Vec<NodeRef<'_, Node>> {
    fn collect<'a>(node: NodeRef<'a, Node>, out: &mut Vec<NodeRef<'a, Node>>) {
        for child in child_elements(node) {
            match tag_name(child) {
                Some("tr") => out.push(child),
                Some("table") => {}
                Some(_) => collect(child, out),
                None => {}
            }
        }
    }
    let mut out = Vec::new();
    collect(table, &mut out);
    out
}

/// The first descendant (including `node` itself) with tag name `tag`, in
/// document order.
pub fn find_descendant_tag<'a>(node: NodeRef<'a, Node>, tag: &str) -> Option<NodeRef<'a, Node>> {
    ElementRef::wrap(node)?.descendants().find(|d| tag_name(*d) == Some(tag))
}

/// `colspan` attribute, defaulting to 1 when absent, blank, or unparseable.
pub fn colspan(node: NodeRef<'_, Node>) -> usize {
    ElementRef::wrap(node)
        .and_then(|el| el.value().attr("colspan"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn select_one<'a>(html: &'a Html, selector: &str) -> NodeRef<'a, Node> {
        let sel = Selector::parse(selector).unwrap();
        *html.select(&sel).next().unwrap()
    }

    #[test]
    fn collapse_whitespace_joins_and_trims() {
        assert_eq!(collapse_whitespace("  a\n\tb   c  "), "a b c");
    }

    #[test]
    fn element_text_collapses_nested_text_nodes() {
        let html = Html::parse_document("<html><body><div id=\"t\">  hello <span>world</span>  </div></body></html>");
        let div = select_one(&html, "#t");
        assert_eq!(element_text(div), "hello world");
    }

    #[test]
    fn count_descendant_tag_counts_nested_tables() {
        let html = Html::parse_document(
            "<html><body><div id=\"t\"><table></table><p><table></table></p></div></body></html>",
        );
        let div = select_one(&html, "#t");
        assert_eq!(count_descendant_tag(div, "table"), 2);
    }

    #[test]
    fn has_bold_descendant_detects_inline_style() {
        let html = Html::parse_document(
            r#"<html><body><div id="t"><span style="font-weight: 700;">Total</span></div></body></html>"#,
        );
        let div = select_one(&html, "#t");
        assert!(has_bold_descendant(div));
    }

    #[test]
    fn colspan_defaults_to_one() {
        let html = Html::parse_document("<html><body><table><tr><td id=\"t\">x</td></tr></table></body></html>");
        let td = select_one(&html, "#t");
        assert_eq!(colspan(td), 1);
    }
}
