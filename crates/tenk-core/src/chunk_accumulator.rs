//! Chunk Accumulator: greedy word-budgeted packing of one item's nodes into
//! chunks, with before/after neighbor overlap.

use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::config::ItemChunkingConfig;
use crate::error::TenKError;
use crate::items::ItemName;
use crate::semantic_document::ItemView;
use crate::types::{Chunk, ChunkMetadata, ChunkType, StructuralNode};

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Steps 1-2: greedy pack. A node that alone exceeds `max_words` still gets
/// its own accumulator (`OversizedNode`, logged, not split — semantic
/// splitting is explicitly out of scope).
fn pack<'a>(nodes: &'a [StructuralNode], max_words: usize) -> Vec<Vec<&'a StructuralNode>> {
    let mut accumulators = Vec::new();
    let mut current: Vec<&StructuralNode> = Vec::new();
    let mut current_words = 0usize;

    for node in nodes {
        let Some(text) = node.text() else { continue };
        let w = word_count(text);

        if !current.is_empty() && current_words + w > max_words {
            accumulators.push(std::mem::take(&mut current));
            current_words = 0;
        }
        current.push(node);
        current_words += w;
        if current.len() == 1 && w > max_words {
            tracing::warn!(node_id = %node.id(), words = w, max_words, "node exceeds max_chunk_size_words, emitting oversized chunk");
        }
    }
    if !current.is_empty() {
        accumulators.push(current);
    }
    accumulators
}

struct Overlap {
    content: String,
    table_ref: Option<String>,
    image_ref: Option<String>,
}

impl Overlap {
    fn from_edge_node(edge: &StructuralNode, words: &str) -> Overlap {
        if edge.is_table() {
            Overlap {
                content: edge.min_text().unwrap_or_default().to_string(),
                table_ref: Some(edge.id().to_string()),
                image_ref: None,
            }
        } else if edge.is_image() {
            Overlap {
                content: edge.min_text().unwrap_or_default().to_string(),
                table_ref: None,
                image_ref: Some(edge.id().to_string()),
            }
        } else {
            Overlap {
                content: words.to_string(),
                table_ref: None,
                image_ref: None,
            }
        }
    }
}

/// The last `overlap_words` words of `group`, or the full `min_text` (plus a
/// reference) if `group` ends on a table or image.
fn overlap_before(group: &[&StructuralNode], overlap_words: usize) -> Overlap {
    let last = *group.last().expect("accumulator is never empty");
    if last.is_table() || last.is_image() {
        return Overlap::from_edge_node(last, "");
    }
    let joined = group.iter().filter_map(|n| n.text()).collect::<Vec<_>>().join("\n\n");
    let words: Vec<&str> = joined.split_whitespace().collect();
    let start = words.len().saturating_sub(overlap_words);
    Overlap::from_edge_node(last, &words[start..].join(" "))
}

/// The first `overlap_words` words of `group`, or the full `min_text` (plus a
/// reference) if `group` starts on a table or image.
fn overlap_after(group: &[&StructuralNode], overlap_words: usize) -> Overlap {
    let first = *group.first().expect("accumulator is never empty");
    if first.is_table() || first.is_image() {
        return Overlap::from_edge_node(first, "");
    }
    let joined = group.iter().filter_map(|n| n.text()).collect::<Vec<_>>().join("\n\n");
    let words: Vec<&str> = joined.split_whitespace().collect();
    let end = words.len().min(overlap_words);
    Overlap::from_edge_node(first, &words[..end].join(" "))
}

fn dedup_preserve_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

fn new_chunk_id(item: ItemName, local_idx: usize) -> String {
    let prefix = item.label().replace(' ', "_");
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{local_idx}_{}", &hex[..8])
}

fn assemble_chunk(item: ItemName, group: &[&StructuralNode], before: Option<Overlap>, after: Option<Overlap>, local_idx: usize) -> Chunk {
    let first = *group.first().expect("accumulator is never empty");

    let mut content_parts = Vec::new();
    if let Some(b) = &before {
        content_parts.push(b.content.clone());
    }
    let body = group.iter().filter_map(|n| n.text()).collect::<Vec<_>>().join("\n\n");
    content_parts.push(body);
    if let Some(a) = &after {
        content_parts.push(a.content.clone());
    }
    let content = content_parts.join("\n\n");

    let mut page_numbers: Vec<u32> = group.iter().filter_map(|n| n.metadata().page_number).collect();
    page_numbers.sort_unstable();
    page_numbers.dedup();
    let page_range = match (page_numbers.first(), page_numbers.last()) {
        (Some(&min), Some(&max)) => Some((min, max)),
        _ => None,
    };

    let structural_node_ids: Vec<String> = group.iter().map(|n| n.id().to_string()).collect();

    let mut table_references: Vec<String> = group.iter().filter(|n| n.is_table()).map(|n| n.id().to_string()).collect();
    let mut image_references: Vec<String> = group.iter().filter(|n| n.is_image()).map(|n| n.id().to_string()).collect();
    for overlap in [&before, &after].into_iter().flatten() {
        table_references.extend(overlap.table_ref.clone());
        image_references.extend(overlap.image_ref.clone());
    }
    table_references = dedup_preserve_order(table_references);
    image_references = dedup_preserve_order(image_references);

    let info = item.info();
    Chunk {
        id: new_chunk_id(item, local_idx),
        content,
        metadata: ChunkMetadata {
            chunk_type: ChunkType::Regular,
            item,
            item_anchor: first.metadata().item_anchor.clone(),
            item_title: info.display_name.to_string(),
            item_description: info.description.to_string(),
            page_numbers,
            page_range,
            table_references,
            image_references,
            structural_node_ids,
            order: 0,
            filing: first.metadata().filing.clone(),
        },
    }
}

/// Packs one item's nodes into chunks and wires neighbor overlap, per 4.6.
/// `order` on the returned chunks is a local placeholder; the chunker assigns
/// the document-wide global order afterward. Checks `cancel` between each
/// assembled chunk, the design's second cooperative-cancellation checkpoint.
pub fn chunk_item_view(view: &ItemView<'_>, cfg: ItemChunkingConfig, cancel: &CancellationToken) -> Result<Vec<Chunk>, TenKError> {
    let groups = pack(view.nodes, cfg.max_chunk_size_words);
    let n = groups.len();

    let mut chunks = Vec::with_capacity(n);
    for (idx, group) in groups.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(TenKError::Cancelled);
        }
        let before = (cfg.chunk_overlap_words > 0 && idx > 0).then(|| overlap_before(&groups[idx - 1], cfg.chunk_overlap_words));
        let after = (cfg.chunk_overlap_words > 0 && idx + 1 < n).then(|| overlap_after(&groups[idx + 1], cfg.chunk_overlap_words));
        chunks.push(assemble_chunk(view.item, group, before, after, idx));
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::items::ItemName;
    use crate::types::{FilingForm, FilingMeta, ImageNode, NodeType, StructuralNodeMetadata, TextNode};

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

    fn text_node(words: usize) -> StructuralNode {
        word_node("word", words)
    }

    fn word_node(word: &str, count: usize) -> StructuralNode {
        let text = vec![word; count].join(" ");
        StructuralNode::Text(TextNode {
            metadata: StructuralNodeMetadata::new(NodeType::Text, ItemName::Item7, "item7".to_string(), filing()),
            text,
        })
    }

    fn image_node() -> StructuralNode {
        StructuralNode::Image(ImageNode {
            metadata: StructuralNodeMetadata::new(NodeType::Image, ItemName::Item7, "item7".to_string(), filing()),
            img_src: "chart.png".to_string(),
            img_alt: "Revenue chart".to_string(),
            text: "[chart.png Revenue chart]".to_string(),
            min_text: "[chart.png Revenue chart]".to_string(),
        })
    }

    #[test]
    fn t6_oversized_node_gets_its_own_chunk() {
        let nodes = vec![text_node(800)];
        let view = ItemView { item: ItemName::Item7, nodes: &nodes };
        let cfg = ItemChunkingConfig {
            min_chunk_size_words: 100,
            max_chunk_size_words: 500,
            chunk_overlap_words: 50,
        };
        let chunks = chunk_item_view(&view, cfg, &CancellationToken::new()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.structural_node_ids.len(), 1);
    }

    #[test]
    fn t4_overlap_into_table_uses_min_text_and_references_it() {
        // The table's verbose text is long enough that it cannot share an
        // accumulator with either 400-word neighbor, forcing 3 chunks.
        let table = StructuralNode::Table(crate::types::TableNode {
            metadata: StructuralNodeMetadata::new(NodeType::Table, ItemName::Item7, "item7".to_string(), filing()),
            dataframe: vec![],
            caption: None,
            table_metadata: Default::default(),
            table_lookup: Default::default(),
            text: vec!["cell"; 200].join(" "),
            min_text: "{\"table_id\":\"t1\"}".to_string(),
        });
        let nodes = vec![text_node(400), table, text_node(400)];
        let view = ItemView { item: ItemName::Item7, nodes: &nodes };
        let cfg = ItemChunkingConfig {
            min_chunk_size_words: 100,
            max_chunk_size_words: 500,
            chunk_overlap_words: 50,
        };
        let chunks = chunk_item_view(&view, cfg, &CancellationToken::new()).unwrap();
        assert!(chunks.len() >= 3);
        let table_id = nodes[1].id();
        assert!(chunks[0].content.contains("table_id"));
        assert!(chunks[0].metadata.table_references.contains(&table_id.to_string()));
        let last = chunks.last().unwrap();
        assert!(last.metadata.table_references.contains(&table_id.to_string()));
    }

    #[test]
    fn image_overlap_populates_image_references_not_table_references() {
        let nodes = vec![text_node(400), image_node(), text_node(400)];
        let view = ItemView { item: ItemName::Item7, nodes: &nodes };
        let cfg = ItemChunkingConfig {
            min_chunk_size_words: 100,
            max_chunk_size_words: 500,
            chunk_overlap_words: 50,
        };
        let chunks = chunk_item_view(&view, cfg, &CancellationToken::new()).unwrap();
        let image_id = nodes[1].id().to_string();
        assert!(chunks[0].metadata.image_references.contains(&image_id));
        assert!(chunks[0].metadata.table_references.is_empty());
    }

    #[test]
    fn zero_overlap_words_disables_overlap_entirely() {
        let nodes = vec![word_node("alpha", 400), word_node("beta", 400)];
        let view = ItemView { item: ItemName::Item7, nodes: &nodes };
        let cfg = ItemChunkingConfig {
            min_chunk_size_words: 100,
            max_chunk_size_words: 500,
            chunk_overlap_words: 0,
        };
        let chunks = chunk_item_view(&view, cfg, &CancellationToken::new()).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(!chunks[0].content.contains("beta"));
        assert!(!chunks[1].content.contains("alpha"));
    }

    #[test]
    fn nonzero_overlap_words_pulls_neighbor_words_across_the_boundary() {
        let nodes = vec![word_node("alpha", 400), word_node("beta", 400)];
        let view = ItemView { item: ItemName::Item7, nodes: &nodes };
        let cfg = ItemChunkingConfig {
            min_chunk_size_words: 100,
            max_chunk_size_words: 500,
            chunk_overlap_words: 50,
        };
        let chunks = chunk_item_view(&view, cfg, &CancellationToken::new()).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].content.contains("beta"));
        assert!(chunks[1].content.contains("alpha"));
    }
}
