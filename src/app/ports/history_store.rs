use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryStoreError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Malformed history: {0}")]
    Malformed(String),
}

/// Persistence for the query history log, most recent entry first.
#[cfg_attr(test, mockall::automock)]
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<Vec<String>, HistoryStoreError>;

    fn save(&self, entries: &[String]) -> Result<(), HistoryStoreError>;
}
