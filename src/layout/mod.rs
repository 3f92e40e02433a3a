//! Grid layout for the split view

use serde::Serialize;
use serde_json::{json, Value};

/// A near-square grid of editor groups, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

/// Where one file lands in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    /// 1-based editor group (view column) number.
    pub group: usize,
}

impl GridLayout {
    /// `columns = ceil(sqrt(n))`, `rows = ceil(n / columns)`.
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self { columns: 0, rows: 0 };
        }
        let columns = ceil_sqrt(count);
        let rows = count.div_ceil(columns);
        Self { columns, rows }
    }

    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Cell for the file at `index` (0-based).
    pub fn cell(&self, index: usize) -> GridCell {
        let columns = self.columns.max(1);
        let row = index / columns;
        let column = index % columns;
        GridCell { row, column, group: row * columns + column + 1 }
    }

    /// Editor layout descriptor: `rows` horizontal groups, each split into
    /// `columns` equally sized groups.
    pub fn editor_layout(&self) -> Value {
        let row = json!({ "groups": vec![json!({ "size": 1 }); self.columns] });
        json!({
            "orientation": 0,
            "groups": vec![row; self.rows],
        })
    }
}

/// Smallest `c` with `c * c >= n`, without going through floating point.
fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while root * root < n {
        root += 1;
    }
    root
}
