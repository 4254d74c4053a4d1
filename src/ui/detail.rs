use crate::domain::entities::table::ProductionTable;

/// Rows rendered in the detail table; export always writes the full table.
pub const DETAIL_ROW_LIMIT: usize = 500;

/// Leading rows of a table rendered as text, plus the full row count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailRows {
    pub columns: Vec<String>,
    pub cells: Vec<Vec<String>>,
    pub total: usize,
}

impl DetailRows {
    pub fn from_table(table: &ProductionTable, limit: usize) -> Self {
        let cells = table
            .rows()
            .iter()
            .take(limit)
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Self {
            columns: table.column_names(),
            cells,
            total: table.len(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.cells.len() < self.total
    }

    /// Caption shown under a truncated table.
    pub fn caption(&self) -> Option<String> {
        self.is_truncated()
            .then(|| format!("Mostrando {} de {} registros", self.cells.len(), self.total))
    }
}
