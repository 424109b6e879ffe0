//! In-memory result table.
//!
//! An ordered sequence of named columns, each an ordered sequence of cells
//! with one shared row count. The table is built once by the source, mutated
//! column-by-column by the coercion pipeline, and read row-wise by the sink.

use std::collections::HashSet;

use crate::core::value::CellValue;

/// A single named column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name from the result-set metadata.
    pub name: String,

    /// Cell values, one per row.
    pub cells: Vec<CellValue>,
}

/// An in-memory query result.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    columns: Vec<Column>,
    num_rows: usize,
}

impl ResultTable {
    /// Create an empty table with no columns and no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows shared by all columns.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has zero rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Columns in table order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Mutable access to a column's cells.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Vec<CellValue>> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.cells)
    }

    /// Append a column. All columns must share the table's row count.
    ///
    /// The first column added fixes the row count; later columns with a
    /// mismatching length are truncated or padded with NULLs to fit, which
    /// only happens on a misbehaving driver.
    pub fn push_column(&mut self, name: impl Into<String>, mut cells: Vec<CellValue>) {
        if self.columns.is_empty() {
            self.num_rows = cells.len();
        } else {
            cells.resize(self.num_rows, CellValue::Null);
        }
        self.columns.push(Column {
            name: name.into(),
            cells,
        });
    }

    /// One full row, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.cells[index]).collect()
    }

    /// Remove duplicate rows by full-row equality, keeping the first
    /// occurrence. Returns the number of rows removed.
    ///
    /// There is no primary-key concept here: a row is a duplicate exactly
    /// when every cell equals the corresponding cell of an earlier row.
    pub fn dedup_rows(&mut self) -> usize {
        if self.num_rows == 0 {
            return 0;
        }

        let mut seen: HashSet<Vec<u8>> = HashSet::with_capacity(self.num_rows);
        let mut keep: Vec<bool> = Vec::with_capacity(self.num_rows);

        for row_idx in 0..self.num_rows {
            let mut key = Vec::new();
            for col in &self.columns {
                col.cells[row_idx].encode_for_hash(&mut key);
            }
            keep.push(seen.insert(key));
        }

        let kept = keep.iter().filter(|k| **k).count();
        let removed = self.num_rows - kept;
        if removed == 0 {
            return 0;
        }

        for col in &mut self.columns {
            let mut row_idx = 0;
            col.cells.retain(|_| {
                let k = keep[row_idx];
                row_idx += 1;
                k
            });
        }
        self.num_rows = kept;
        removed
    }
}
