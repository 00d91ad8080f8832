use thiserror::Error;

use duckboard_domain::PanelId;

/// Synchronous registry failures. A failed operation leaves every entity
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Database already loaded: {0}")]
    DuplicateDatabase(String),
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),
    #[error("Panel not found: {0}")]
    PanelNotFound(PanelId),
}
