//! Chunking configuration: per-item word budgets.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::items::ItemName;

/// Word-budget parameters for the chunk accumulator, one set per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChunkingConfig {
    /// Soft lower bound; not enforced. A chunk may be emitted below this size if
    /// it is the final accumulator for an item.
    pub min_chunk_size_words: usize,
    /// Hard upper bound on core content, before overlap is added.
    pub max_chunk_size_words: usize,
    /// Target words taken from each neighbor; `0` disables overlap entirely.
    pub chunk_overlap_words: usize,
}

impl Default for ItemChunkingConfig {
    fn default() -> Self {
        DEFAULT_ITEM_CHUNKING_CONFIG
    }
}

pub const DEFAULT_ITEM_CHUNKING_CONFIG: ItemChunkingConfig = ItemChunkingConfig {
    min_chunk_size_words: 100,
    max_chunk_size_words: 500,
    chunk_overlap_words: 50,
};

/// Process-wide per-item chunking configuration. Every item currently shares the
/// same defaults; the table exists so a caller can override a subset of items
/// without touching the rest.
pub static ITEMS_CHUNKING_CONFIGS: Lazy<HashMap<ItemName, ItemChunkingConfig>> = Lazy::new(|| {
    ItemName::ALL
        .iter()
        .map(|item| (*item, DEFAULT_ITEM_CHUNKING_CONFIG))
        .collect()
});

/// Looks up the configured [`ItemChunkingConfig`] for `item`, falling back to the
/// default if the table has no entry (it always does, but callers may supply a
/// partial override table via [`crate::pipeline::chunk_document`]).
pub fn config_for(table: &HashMap<ItemName, ItemChunkingConfig>, item: ItemName) -> ItemChunkingConfig {
    table.get(&item).copied().unwrap_or(DEFAULT_ITEM_CHUNKING_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_source_defaults() {
        assert_eq!(DEFAULT_ITEM_CHUNKING_CONFIG.min_chunk_size_words, 100);
        assert_eq!(DEFAULT_ITEM_CHUNKING_CONFIG.max_chunk_size_words, 500);
        assert_eq!(DEFAULT_ITEM_CHUNKING_CONFIG.chunk_overlap_words, 50);
    }

    #[test]
    fn every_item_has_a_configured_entry() {
        for item in ItemName::ALL {
            assert!(ITEMS_CHUNKING_CONFIGS.contains_key(item));
        }
    }
}
