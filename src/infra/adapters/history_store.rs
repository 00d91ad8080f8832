use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use duckboard_app::ports::{HistoryStore, HistoryStoreError};

use crate::config::paths::get_data_dir;

const STORE_FILE_NAME: &str = "history.json";
const HISTORY_KEY: &str = "query_history";

/// A JSON object file used as a small key-value store. The history lives
/// under `query_history`; other keys are preserved on save.
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new() -> Result<Self, HistoryStoreError> {
        let data_dir = get_data_dir().map_err(|e| HistoryStoreError::Io(e.to_string()))?;
        Ok(Self::with_path(data_dir.join(STORE_FILE_NAME)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_object(&self) -> Result<Option<Map<String, Value>>, HistoryStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| HistoryStoreError::Io(e.to_string()))?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(HistoryStoreError::Malformed(
                "store is not a JSON object".to_string(),
            )),
            Err(e) => Err(HistoryStoreError::Malformed(e.to_string())),
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryStoreError> {
        let Some(mut store) = self.read_object()? else {
            return Ok(Vec::new());
        };

        match store.remove(HISTORY_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value::<Vec<String>>(value)
                .map_err(|e| HistoryStoreError::Malformed(format!("{HISTORY_KEY}: {e}"))),
        }
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryStoreError> {
        // Unreadable stores are overwritten.
        let mut store = self.read_object().ok().flatten().unwrap_or_default();
        store.insert(
            HISTORY_KEY.to_string(),
            Value::Array(entries.iter().cloned().map(Value::String).collect()),
        );

        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| HistoryStoreError::Io(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(store))
            .map_err(|e| HistoryStoreError::Io(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| HistoryStoreError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> JsonHistoryStore {
        JsonHistoryStore::with_path(dir.path().join(STORE_FILE_NAME))
    }

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    mod load {
        use super::*;

        #[test]
        fn missing_file_is_empty_history() {
            let dir = TempDir::new().unwrap();

            assert!(store(&dir).load().unwrap().is_empty());
        }

        #[test]
        fn missing_key_is_empty_history() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);
            fs::write(store.path(), r#"{"theme": "dark"}"#).unwrap();

            assert!(store.load().unwrap().is_empty());
        }

        #[test]
        fn invalid_json_is_malformed() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);
            fs::write(store.path(), "{not json").unwrap();

            assert!(matches!(store.load(), Err(HistoryStoreError::Malformed(_))));
        }

        #[test]
        fn non_string_entries_are_malformed() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);
            fs::write(store.path(), r#"{"query_history": [1, 2]}"#).unwrap();

            assert!(matches!(store.load(), Err(HistoryStoreError::Malformed(_))));
        }

        #[test]
        fn top_level_array_is_malformed() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);
            fs::write(store.path(), r#"["SELECT 1"]"#).unwrap();

            assert!(matches!(store.load(), Err(HistoryStoreError::Malformed(_))));
        }
    }

    mod save {
        use super::*;

        #[test]
        fn saved_entries_load_in_order() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);

            store.save(&entries(&["SELECT 2", "SELECT 1"])).unwrap();

            assert_eq!(store.load().unwrap(), entries(&["SELECT 2", "SELECT 1"]));
        }

        #[test]
        fn other_keys_survive() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);
            fs::write(store.path(), r#"{"theme": "dark", "query_history": []}"#).unwrap();

            store.save(&entries(&["SELECT 1"])).unwrap();

            let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
            assert_eq!(raw["theme"], "dark");
            assert_eq!(raw["query_history"][0], "SELECT 1");
        }

        #[test]
        fn creates_missing_parent_directory() {
            let dir = TempDir::new().unwrap();
            let store = JsonHistoryStore::with_path(dir.path().join("nested").join(STORE_FILE_NAME));

            store.save(&entries(&["SELECT 1"])).unwrap();

            assert_eq!(store.load().unwrap(), entries(&["SELECT 1"]));
        }

        #[test]
        fn malformed_store_is_replaced() {
            let dir = TempDir::new().unwrap();
            let store = store(&dir);
            fs::write(store.path(), "garbage").unwrap();

            store.save(&entries(&["SELECT 1"])).unwrap();

            assert_eq!(store.load().unwrap(), entries(&["SELECT 1"]));
        }
    }
}
