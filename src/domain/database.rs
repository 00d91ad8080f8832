use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetadataState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Error(String),
}

/// A loaded DuckDB file and its cached table list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub path: String,
    pub tables: Vec<String>,
    pub tables_state: MetadataState,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tables: Vec::new(),
            tables_state: MetadataState::NotLoaded,
        }
    }

    /// File name without directories, falling back to the full path.
    pub fn display_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_database_has_no_tables() {
        let db = Database::new("/data/model.duckdb");

        assert!(db.tables.is_empty());
        assert_eq!(db.tables_state, MetadataState::NotLoaded);
    }

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(Database::new("/data/model.duckdb").display_name(), "model.duckdb");
        assert_eq!(Database::new("model.duckdb").display_name(), "model.duckdb");
    }
}
