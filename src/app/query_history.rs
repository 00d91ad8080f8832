use std::collections::VecDeque;

use crate::config::DEFAULT_HISTORY_LIMIT;

/// Issued SQL statements, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl QueryHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Restores a persisted log. Entries past `limit` are dropped.
    pub fn from_entries(entries: Vec<String>, limit: usize) -> Self {
        let mut entries: VecDeque<String> = entries.into();
        entries.truncate(limit);
        Self { entries, limit }
    }

    /// Records `sql` at the front. Only an exact repeat of the front entry is
    /// skipped; returns whether the log changed.
    pub fn push(&mut self, sql: &str) -> bool {
        if self.limit == 0 || self.entries.front().is_some_and(|front| front == sql) {
            return false;
        }
        self.entries.push_front(sql.to_string());
        self.entries.truncate(self.limit);
        true
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
