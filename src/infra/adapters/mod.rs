pub mod duckdb;
pub mod history_store;

pub use duckdb::DuckDbCliAdapter;
pub use history_store::JsonHistoryStore;
