//! Pipe-table row scanner

use serde::{Deserialize, Serialize};

use super::lines_with_offsets;

/// A data row of a pipe table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Byte offset of the start of the row line
    pub offset: usize,
    /// Trimmed segments of the line split on `|`.
    ///
    /// The segment before the leading pipe is kept (always empty), as is the
    /// one after a trailing pipe, so `cells[n - 1]` is column `n` counting
    /// that leading segment as column 1.
    pub cells: Vec<String>,
}

impl TableRow {
    /// Cell at 1-based column `n`, or `""` when the row is shorter.
    pub fn column(&self, n: usize) -> &str {
        n.checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Returns the table rows of `text`, skipping header-separator lines.
pub fn table_rows(text: &str) -> Vec<TableRow> {
    lines_with_offsets(text)
        .filter_map(|(offset, line)| parse_row(line).map(|cells| TableRow { offset, cells }))
        .collect()
}

/// Splits a single line into cells if it is a non-separator table row.
fn parse_row(line: &str) -> Option<Vec<String>> {
    if !line.starts_with('|') || is_separator(line) {
        return None;
    }
    Some(line.split('|').map(|c| c.trim().to_string()).collect())
}

fn is_separator(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}
