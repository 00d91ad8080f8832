//! Loaded database files, keyed by path, in load order.

use std::path::{Component, Path, PathBuf};

use duckboard_domain::{Database, MetadataState};

use crate::error::RegistryError;

#[derive(Debug, Clone, Default)]
pub struct DatabaseRegistry {
    entries: Vec<Database>,
}

impl DatabaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_database(&mut self, path: impl Into<String>) -> Result<(), RegistryError> {
        let path = path.into();
        if self.contains(&path) {
            return Err(RegistryError::DuplicateDatabase(path));
        }
        self.entries.push(Database::new(path));
        Ok(())
    }

    /// Removes the entry. Unbinding the panels that referenced it is the
    /// caller's job (see `PanelRegistry::unbind_database`).
    pub fn remove_database(&mut self, path: &str) -> Result<Database, RegistryError> {
        let idx = self
            .position(path)
            .ok_or_else(|| RegistryError::DatabaseNotFound(path.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    pub fn refresh_tables(&mut self, path: &str, tables: Vec<String>) -> Result<(), RegistryError> {
        let entry = self.entry_mut(path)?;
        entry.tables = tables;
        entry.tables_state = MetadataState::Loaded;
        Ok(())
    }

    pub fn set_tables_loading(&mut self, path: &str) -> Result<(), RegistryError> {
        self.entry_mut(path)?.tables_state = MetadataState::Loading;
        Ok(())
    }

    /// Records a failed table-list fetch. The previous table list is kept.
    pub fn set_tables_error(&mut self, path: &str, message: String) -> Result<(), RegistryError> {
        self.entry_mut(path)?.tables_state = MetadataState::Error(message);
        Ok(())
    }

    pub fn has_any(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    pub fn get(&self, path: &str) -> Option<&Database> {
        self.entries.iter().find(|db| db.path == path)
    }

    /// Finds the entry a user-typed path refers to. Keys are canonical, so a
    /// relative path matches the single entry whose path ends with it.
    pub fn resolve(&self, path: &str) -> Option<&Database> {
        if let Some(db) = self.get(path) {
            return Some(db);
        }
        let wanted: PathBuf = Path::new(path)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if wanted.as_os_str().is_empty() || wanted.is_absolute() {
            return None;
        }
        let mut candidates = self
            .entries
            .iter()
            .filter(|db| Path::new(&db.path).ends_with(&wanted));
        match (candidates.next(), candidates.next()) {
            (Some(db), None) => Some(db),
            _ => None,
        }
    }

    pub fn get_at(&self, idx: usize) -> Option<&Database> {
        self.entries.get(idx)
    }

    pub fn list(&self) -> &[Database] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|db| db.path == path)
    }

    fn entry_mut(&mut self, path: &str) -> Result<&mut Database, RegistryError> {
        self.entries
            .iter_mut()
            .find(|db| db.path == path)
            .ok_or_else(|| RegistryError::DatabaseNotFound(path.to_string()))
    }
}
