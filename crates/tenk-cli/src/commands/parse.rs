//! `parse` command - runs the structural parsing and chunking pipeline over
//! a local 10-K HTML file and prints the result.

use anyhow::{Context, Result};
use serde_json::json;

use tenk_core::{FilingMeta, ITEMS_CHUNKING_CONFIGS, StructuralNode, chunk_document, parse_filing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parses `html` under `filing_meta`, optionally chunks the result, and
/// prints it in `format`.
///
/// # Errors
///
/// Returns an error if parsing fails (e.g. the table of contents cannot be
/// resolved) or if JSON serialization of the result fails.
pub fn run(html: &str, filing_meta: FilingMeta, chunk: bool, format: OutputFormat) -> Result<()> {
    let nodes = parse_filing(html, filing_meta).context("Failed to parse filing HTML")?;

    if chunk {
        let chunks = chunk_document(&nodes, &ITEMS_CHUNKING_CONFIGS).context("Failed to chunk parsed filing")?;
        print_chunks(&chunks, format)
    } else {
        print_nodes(&nodes, format)
    }
}

fn print_nodes(nodes: &[StructuralNode], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for node in nodes {
                let meta = node.metadata();
                println!(
                    "[{:>5}] {:<10} {:?}",
                    meta.structural_order.unwrap_or_default(),
                    meta.parent_item.label(),
                    node.node_type()
                );
            }
            println!("{} structural nodes", nodes.len());
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(nodes).context("Failed to serialize structural nodes to JSON")?
            );
        }
    }
    Ok(())
}

fn print_chunks(chunks: &[tenk_core::Chunk], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for chunk in chunks {
                println!(
                    "=== chunk {} (item {}, pages {:?}) ===",
                    chunk.metadata.order,
                    chunk.metadata.item.label(),
                    chunk.metadata.page_range
                );
                println!("{}", chunk.content);
                println!();
            }
            println!("{} chunks", chunks.len());
        }
        OutputFormat::Json => {
            let output = json!({ "chunks": chunks });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize chunks to JSON")?
            );
        }
    }
    Ok(())
}
