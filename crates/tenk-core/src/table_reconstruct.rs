//! Table Reconstructor: rebuilds a logical 2-D grid from an HTML `<table>`,
//! disambiguating duplicate headers, expanding `colspan`, and merging
//! consecutive columns that share a base name.

use std::collections::HashMap;

use ego_tree::NodeRef;
use scraper::Node;
use uuid::Uuid;

use crate::dom::{child_elements, colspan, element_text, has_bold_descendant, is_tag, table_rows};
use crate::types::{TableLookup, TableMetadata};

/// Everything the table reconstructor derives from one `<table>` element.
#[derive(Debug, Clone)]
pub struct TableReconstruction {
    /// Merged grid, header row first, one row per surviving source `<tr>`.
    pub dataframe: Vec<Vec<String>>,
    pub caption: Option<String>,
    pub table_metadata: TableMetadata,
    pub table_lookup: TableLookup,
    pub text: String,
    pub min_text: String,
}

/// Which naming rule a header cell falls under, decided in step B before the
/// colspan expansion in step C.
enum HeaderCellKind {
    NonDuplicate(String),
    Duplicate(String, usize),
    /// The group index increments once per transition from a non-empty cell
    /// to an empty one, so two separate padding strips stay distinct.
    Empty(usize),
}

/// `base__group__i` -> `base__group`; `base__i` -> `base`; no `__` -> unchanged.
fn merge_key(name: &str) -> String {
    let parts: Vec<&str> = name.split("__").collect();
    match parts.len() {
        n if n >= 3 => parts[..n - 1].join("__"),
        2 => parts[0].to_string(),
        _ => name.to_string(),
    }
}

fn cells_of(row: NodeRef<'_, Node>) -> Vec<NodeRef<'_, Node>> {
    child_elements(row).filter(|c| is_tag(*c, "td") || is_tag(*c, "th")).collect()
}

/// Step A: the first row with a `<th>`, a bolded descendant, or (falling back)
/// row 0.
fn find_header_row_index(rows: &[NodeRef<'_, Node>]) -> usize {
    for (i, row) in rows.iter().enumerate() {
        let has_th = cells_of(*row).iter().any(|c| is_tag(*c, "th"));
        if has_th || has_bold_descendant(*row) {
            return i;
        }
    }
    0
}

/// Step B: classify each header cell.
fn classify_header_cells(cells: &[NodeRef<'_, Node>]) -> Vec<HeaderCellKind> {
    let texts: Vec<String> = cells.iter().map(|c| element_text(*c)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in &texts {
        if !t.is_empty() {
            *counts.entry(t.as_str()).or_insert(0) += 1;
        }
    }

    let mut kinds = Vec::with_capacity(cells.len());
    let mut empty_group: Option<usize> = None;
    let mut prev_empty = false;
    let mut dup_running: HashMap<String, usize> = HashMap::new();

    for text in texts {
        if text.is_empty() {
            if !prev_empty {
                empty_group = Some(empty_group.map_or(0, |g| g + 1));
            }
            prev_empty = true;
            kinds.push(HeaderCellKind::Empty(empty_group.unwrap_or(0)));
        } else {
            prev_empty = false;
            if counts.get(text.as_str()).copied().unwrap_or(0) > 1 {
                let idx = dup_running.entry(text.clone()).or_insert(0);
                let cur = *idx;
                *idx += 1;
                kinds.push(HeaderCellKind::Duplicate(text, cur));
            } else {
                kinds.push(HeaderCellKind::NonDuplicate(text));
            }
        }
    }
    kinds
}

/// Step C: expand header cells by their `colspan` into position-suffixed labels.
fn expand_header_row(cells: &[NodeRef<'_, Node>], kinds: &[HeaderCellKind]) -> Vec<String> {
    let mut out = Vec::new();
    for (cell, kind) in cells.iter().zip(kinds) {
        let span = colspan(*cell);
        for i in 0..span {
            let label = match kind {
                HeaderCellKind::NonDuplicate(base) => format!("{base}__{i}"),
                HeaderCellKind::Duplicate(base, dup_idx) => format!("{base}__{dup_idx}__{i}"),
                HeaderCellKind::Empty(group) => format!("empty_col__{group}__{i}"),
            };
            out.push(label);
        }
    }
    out
}

/// Steps D/E: expand one data row's cells by `colspan`, derive its row name,
/// zero out the first cell's span (it becomes the row index, not a value),
/// and normalize the row to `width` columns. Rows that are empty or
/// whitespace-only across every expanded cell are skipped entirely.
fn expand_data_row(row: NodeRef<'_, Node>, source_index: usize, width: usize) -> Option<(String, Vec<String>)> {
    let cells = cells_of(row);
    let first_cell = *cells.first()?;

    let mut expanded = Vec::new();
    for cell in &cells {
        let span = colspan(*cell);
        expanded.push(element_text(*cell));
        for _ in 1..span {
            expanded.push(String::new());
        }
    }
    expanded.resize(width, String::new());

    if expanded.iter().all(|c| c.trim().is_empty()) {
        return None;
    }

    let raw_name = element_text(first_cell);
    let base_name = if raw_name.is_empty() { format!("Row_{source_index}") } else { raw_name };
    let row_name = format!("{base_name} ({source_index})");

    let first_span = colspan(first_cell).min(expanded.len());
    for slot in expanded.iter_mut().take(first_span) {
        slot.clear();
    }

    Some((row_name, expanded))
}

/// Step F: group consecutive columns sharing a merge key, collapsing each run
/// into a single column named by that key (header) or the concatenation of
/// its non-empty values (data rows).
fn merge_runs(header_row: &[String]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < header_row.len() {
        let key = merge_key(&header_row[i]);
        let mut j = i;
        while j + 1 < header_row.len() && merge_key(&header_row[j + 1]) == key {
            j += 1;
        }
        runs.push((i, j));
        i = j + 1;
    }
    runs
}

fn new_table_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("table_{}", &hex[..12])
}

/// Reconstructs a logical grid from `table`, per steps A-G.
pub fn reconstruct(table: NodeRef<'_, Node>) -> TableReconstruction {
    let caption = child_elements(table)
        .find(|c| is_tag(*c, "caption"))
        .map(element_text)
        .filter(|s| !s.is_empty());

    let rows = table_rows(table);
    if rows.is_empty() {
        let table_metadata = TableMetadata {
            table_id: new_table_id(),
            ..Default::default()
        };
        let min_text = serde_json::to_string(&table_metadata).unwrap_or_default();
        return TableReconstruction {
            dataframe: Vec::new(),
            caption,
            table_metadata,
            table_lookup: TableLookup::default(),
            text: String::new(),
            min_text,
        };
    }

    let header_idx = find_header_row_index(&rows);
    let header_cells = cells_of(rows[header_idx]);
    let header_kinds = classify_header_cells(&header_cells);
    let header_row = expand_header_row(&header_cells, &header_kinds);
    let width = header_row.len();

    let mut row_names = Vec::new();
    let mut data_rows = Vec::new();
    for (k, row) in rows.iter().enumerate() {
        if k == header_idx {
            continue;
        }
        if let Some((name, expanded)) = expand_data_row(*row, k, width) {
            row_names.push(name);
            data_rows.push(expanded);
        }
    }

    let runs = merge_runs(&header_row);
    let merged_header: Vec<String> = runs.iter().map(|&(s, _)| merge_key(&header_row[s])).collect();
    let merged_rows: Vec<Vec<String>> = data_rows
        .iter()
        .map(|row| {
            runs.iter()
                .map(|&(s, e)| row[s..=e].iter().filter(|v| !v.is_empty()).cloned().collect::<Vec<_>>().join(""))
                .collect()
        })
        .collect();

    let mut dataframe = Vec::with_capacity(merged_rows.len() + 1);
    dataframe.push(merged_header.clone());
    dataframe.extend(merged_rows.iter().cloned());

    let column_names: Vec<String> = merged_header.iter().filter(|c| !c.starts_with("empty_col")).cloned().collect();

    let mut table_lookup = TableLookup::default();
    let mut ordered_entries = Vec::new();
    for (ri, row) in merged_rows.iter().enumerate() {
        let row_name = &row_names[ri];
        for (ci, col_name) in merged_header.iter().enumerate() {
            if col_name.starts_with("empty_col") {
                continue;
            }
            let value = &row[ci];
            if value.is_empty() {
                continue;
            }
            table_lookup.insert(row_name.clone(), col_name.clone(), value.clone());
            ordered_entries.push((row_name.clone(), col_name.clone(), value.clone()));
        }
    }

    let table_metadata = TableMetadata {
        table_id: new_table_id(),
        column_names,
        row_names: row_names.clone(),
    };

    let mut lines = Vec::new();
    if let Some(cap) = &caption {
        lines.push(cap.clone());
    }
    for (row, col, value) in &ordered_entries {
        lines.push(format!("({row}, {col}) -> {}", value.replace('\n', " ")));
    }
    let text = lines.join("\n");
    let min_text = serde_json::to_string(&table_metadata).unwrap_or_default();

    TableReconstruction {
        dataframe,
        caption,
        table_metadata,
        table_lookup,
        text,
        min_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn table_of(html_str: &str) -> Html {
        Html::parse_document(html_str)
    }

    fn select_table(doc: &Html) -> NodeRef<'_, Node> {
        let sel = Selector::parse("table").unwrap();
        *doc.select(&sel).next().unwrap()
    }

    #[test]
    fn t2_duplicate_column_merging() {
        let doc = table_of(
            "<html><body><table>\
                <tr><th>Revenue</th><th></th><th>2025</th><th></th><th>2024</th></tr>\
                <tr><td>Net sales</td><td></td><td>34,550</td><td></td><td>31,200</td></tr>\
            </table></body></html>",
        );
        let result = reconstruct(select_table(&doc));
        assert_eq!(
            result.dataframe[0],
            vec!["Revenue", "empty_col__0", "2025", "empty_col__1", "2024"]
        );
        assert_eq!(result.table_metadata.column_names, vec!["Revenue", "2025", "2024"]);
        assert_eq!(result.table_lookup.get("Net sales (1)", "2025"), Some("34,550"));
    }

    #[test]
    fn t3_duplicate_row_disambiguation() {
        // Header is source row 0; "Net sales" rows land at source positions 4 and 9.
        let doc = table_of(
            "<html><body><table>\
                <tr><th>Line item</th><th>Amount</th></tr>\
                <tr><td>Cost of sales</td><td>1</td></tr>\
                <tr><td>Gross margin</td><td>2</td></tr>\
                <tr><td>Operating expenses</td><td>3</td></tr>\
                <tr><td>Net sales</td><td>100</td></tr>\
                <tr><td>Other</td><td>4</td></tr>\
                <tr><td>Other</td><td>5</td></tr>\
                <tr><td>Other</td><td>6</td></tr>\
                <tr><td>Other</td><td>7</td></tr>\
                <tr><td>Net sales</td><td>200</td></tr>\
            </table></body></html>",
        );
        let result = reconstruct(select_table(&doc));
        assert_eq!(result.table_metadata.row_names[3], "Net sales (4)");
        assert_eq!(result.table_metadata.row_names[8], "Net sales (9)");
    }

    #[test]
    fn colspan_header_merges_into_one_column() {
        let doc = table_of(
            "<html><body><table>\
                <tr><th>Item</th><th colspan=\"2\">Fiscal 2025</th></tr>\
                <tr><td>Net sales</td><td>$</td><td>34,550</td></tr>\
            </table></body></html>",
        );
        let result = reconstruct(select_table(&doc));
        assert_eq!(result.table_metadata.column_names, vec!["Item", "Fiscal 2025"]);
        assert_eq!(result.table_lookup.get("Net sales (1)", "Fiscal 2025"), Some("$34,550"));
    }

    #[test]
    fn header_row_detected_without_th_via_bold_span() {
        let doc = table_of(
            "<html><body><table>\
                <tr><td><span style=\"font-weight:700\">Metric</span></td><td><span style=\"font-weight:700\">Value</span></td></tr>\
                <tr><td>Headcount</td><td>1,500</td></tr>\
            </table></body></html>",
        );
        let result = reconstruct(select_table(&doc));
        assert_eq!(result.table_metadata.column_names, vec!["Metric", "Value"]);
    }

    #[test]
    fn empty_table_returns_empty_reconstruction() {
        let doc = table_of("<html><body><table></table></body></html>");
        let result = reconstruct(select_table(&doc));
        assert!(result.dataframe.is_empty());
        assert!(result.table_metadata.column_names.is_empty());
    }
}
