use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use duckboard::app::ports::{
    HistoryStore, HistoryStoreError, MetadataError, MetadataProvider, QueryError, QueryGateway,
};
use duckboard::domain::ColumnarResult;

pub const SLOW_MARKER: &str = "/* slow */";

pub fn table_result() -> ColumnarResult {
    ColumnarResult::new(
        vec!["table_name".to_string(), "estimated_size".to_string()],
        vec![
            vec!["asset_both".to_string(), "120".to_string()],
            vec!["rep_periods_data".to_string(), "8".to_string()],
        ],
        3,
    )
}

/// Answers every statement with `table_result()`, except statements carrying
/// `SLOW_MARKER`, which never finish.
#[derive(Default)]
pub struct FakeGateway {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl QueryGateway for FakeGateway {
    async fn execute(&self, _database_path: &str, sql: &str) -> Result<ColumnarResult, QueryError> {
        self.calls.lock().unwrap().push(sql.to_string());
        if sql.contains(SLOW_MARKER) {
            std::future::pending::<()>().await;
        }
        Ok(table_result())
    }
}

/// Known databases map to their table lists; anything else fails.
#[derive(Default)]
pub struct FakeMetadata {
    pub tables: HashMap<String, Vec<String>>,
}

impl FakeMetadata {
    pub fn with_database(mut self, path: &str, tables: &[&str]) -> Self {
        self.tables.insert(
            path.to_string(),
            tables.iter().map(|t| t.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn list_tables(&self, database_path: &str) -> Result<Vec<String>, MetadataError> {
        self.tables
            .get(database_path)
            .cloned()
            .ok_or_else(|| MetadataError::InvalidPath(database_path.to_string()))
    }
}

#[derive(Default)]
pub struct MemoryHistoryStore {
    pub saved: Mutex<Vec<String>>,
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryStoreError> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryStoreError> {
        *self.saved.lock().unwrap() = entries.to_vec();
        Ok(())
    }
}
