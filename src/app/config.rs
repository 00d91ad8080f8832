use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 4;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_RESULT_CACHE_SIZE: usize = 32;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Tunables read from `config.toml`; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Quiet period before a burst of filter edits issues its query
    pub debounce_ms: u64,
    pub max_concurrent_queries: usize,
    pub history_limit: usize,
    /// 0 disables result caching
    pub result_cache_size: usize,
    pub query_timeout_secs: u64,
    pub duckdb_bin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_concurrent_queries: DEFAULT_MAX_CONCURRENT_QUERIES,
            history_limit: DEFAULT_HISTORY_LIMIT,
            result_cache_size: DEFAULT_RESULT_CACHE_SIZE,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            duckdb_bin: "duckdb".to_string(),
        }
    }
}

impl AppConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// At least one query slot, whatever the file says.
    pub fn query_slots(&self) -> usize {
        self.max_concurrent_queries.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_documented_values() {
        let config = AppConfig::default();

        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.query_slots(), 4);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.duckdb_bin, "duckdb");
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let config: AppConfig = serde_json::from_str(r#"{"debounce_ms": 0}"#).unwrap();

        assert_eq!(config.debounce_ms, 0);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn zero_concurrency_still_gets_one_slot() {
        let config = AppConfig {
            max_concurrent_queries: 0,
            ..Default::default()
        };

        assert_eq!(config.query_slots(), 1);
    }
}
