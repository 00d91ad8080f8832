use async_trait::async_trait;
use thiserror::Error;

use duckboard_domain::ColumnarResult;

/// Execution failure. The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryGateway: Send + Sync {
    async fn execute(&self, database_path: &str, sql: &str) -> Result<ColumnarResult, QueryError>;
}
