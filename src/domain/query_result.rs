/// Columnar result of a SQL statement as returned by the query gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnarResult {
    /// Column names from the result set
    pub columns: Vec<String>,
    /// Row data as strings (each inner Vec represents a row)
    pub rows: Vec<Vec<String>>,
    /// Total number of rows returned
    pub row_count: usize,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl ColumnarResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>, execution_time_ms: u64) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            execution_time_ms,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of the named column, top to bottom. Short rows yield "".
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.column_at(idx))
    }

    pub fn column_at(&self, idx: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(idx).map_or("", String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn row_count_display(&self) -> String {
        if self.row_count == 1 {
            "1 row".to_string()
        } else {
            format!("{} rows", self.row_count)
        }
    }
}
