pub mod history_store;
pub mod metadata;
pub mod query_gateway;
pub mod renderer;

pub use history_store::{HistoryStore, HistoryStoreError};
pub use metadata::{MetadataError, MetadataProvider};
pub use query_gateway::{QueryError, QueryGateway};
pub use renderer::Renderer;

#[cfg(test)]
pub use history_store::MockHistoryStore;
#[cfg(test)]
pub use metadata::MockMetadataProvider;
#[cfg(test)]
pub use query_gateway::MockQueryGateway;
