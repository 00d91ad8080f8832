use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use duckboard_domain::ColumnarResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    database_path: String,
    sql: String,
}

/// Successful results keyed by `(database path, sql)`.
///
/// A capacity of 0 disables caching: inserts are dropped and every lookup
/// misses.
pub struct ResultCache {
    inner: Option<LruCache<CacheKey, Arc<ColumnarResult>>>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(LruCache::new),
        }
    }

    pub fn insert(&mut self, database_path: &str, sql: &str, result: Arc<ColumnarResult>) {
        if let Some(inner) = self.inner.as_mut() {
            inner.put(key(database_path, sql), result);
        }
    }

    pub fn get(&mut self, database_path: &str, sql: &str) -> Option<Arc<ColumnarResult>> {
        self.inner
            .as_mut()?
            .get(&key(database_path, sql))
            .map(Arc::clone)
    }

    pub fn contains(&self, database_path: &str, sql: &str) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.peek(&key(database_path, sql)).is_some())
    }

    /// Drops every entry for `database_path` (file reloaded or closed).
    pub fn invalidate_database(&mut self, database_path: &str) {
        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        let stale: Vec<CacheKey> = inner
            .iter()
            .filter(|(k, _)| k.database_path == database_path)
            .map(|(k, _)| k.clone())
            .collect();
        for k in stale {
            inner.pop(&k);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        if let Some(inner) = self.inner.as_mut() {
            inner.clear();
        }
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("len", &self.len())
            .finish()
    }
}

fn key(database_path: &str, sql: &str) -> CacheKey {
    CacheKey {
        database_path: database_path.to_string(),
        sql: sql.to_string(),
    }
}
