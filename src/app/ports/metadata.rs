use async_trait::async_trait;
use thiserror::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn list_tables(&self, database_path: &str) -> Result<Vec<String>, MetadataError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("Not a DuckDB file: {0}")]
    InvalidPath(String),
    #[error("Command not found: {0}")]
    CommandNotFound(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Operation timed out")]
    Timeout,
}
