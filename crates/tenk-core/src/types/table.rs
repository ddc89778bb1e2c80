//! Derived metadata for a reconstructed table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Column and row naming derived from a reconstructed table grid.
///
/// `column_names` excludes any merged column whose name starts with `empty_col`;
/// `row_names` are globally unique within the table (see
/// [`crate::table_reconstruct`] step D).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub table_id: String,
    pub column_names: Vec<String>,
    pub row_names: Vec<String>,
}

/// `(row_name, column_name) -> cell value` lookup over a reconstructed table.
///
/// Entries for empty cells and `empty_col*` columns are omitted. Serializes as a
/// flat list of entries since JSON object keys must be strings and a tuple key
/// cannot be used directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLookup {
    pub data: HashMap<(String, String), String>,
}

impl TableLookup {
    pub fn get(&self, row_name: &str, column_name: &str) -> Option<&str> {
        self.data
            .get(&(row_name.to_string(), column_name.to_string()))
            .map(String::as_str)
    }

    pub fn insert(&mut self, row_name: String, column_name: String, value: String) {
        self.data.insert((row_name, column_name), value);
    }
}

#[derive(Serialize, Deserialize)]
struct TableLookupEntry {
    row_name: String,
    column_name: String,
    value: String,
}

impl Serialize for TableLookup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let entries: Vec<TableLookupEntry> = self
            .data
            .iter()
            .map(|((row_name, column_name), value)| TableLookupEntry {
                row_name: row_name.clone(),
                column_name: column_name.clone(),
                value: value.clone(),
            })
            .collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TableLookup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<TableLookupEntry>::deserialize(deserializer)?;
        let data = entries
            .into_iter()
            .map(|e| ((e.row_name, e.column_name), e.value))
            .collect();
        Ok(TableLookup { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut lookup = TableLookup::default();
        lookup.insert("Revenue (7)".to_string(), "2025".to_string(), "34,550".to_string());

        let json = serde_json::to_string(&lookup).unwrap();
        let restored: TableLookup = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.get("Revenue (7)", "2025"), Some("34,550"));
    }
}
