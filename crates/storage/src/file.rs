//! File store implementation
//!
//! The whole collection lives in one structured text file, TOML by default.
//! Writes go to a temporary sibling first and are renamed into place.

use nin_core::{DateGroups, SharedStore, Store, StoreError, StoreFormat, StoreResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File-backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Store file
    path: PathBuf,

    /// Encoding
    format: StoreFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, format: StoreFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Pick the format from the file extension, TOML unless it ends in `.json`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => StoreFormat::Json,
            _ => StoreFormat::Toml,
        };
        Self::new(path, format)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    fn decode(&self, content: &str) -> StoreResult<DateGroups> {
        if content.trim().is_empty() {
            return Ok(DateGroups::new());
        }
        match self.format {
            StoreFormat::Toml => {
                toml::from_str(content).map_err(|e| StoreError::TomlDecode(e.to_string()))
            }
            StoreFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    fn encode(&self, groups: &DateGroups) -> StoreResult<String> {
        match self.format {
            StoreFormat::Toml => {
                toml::to_string(groups).map_err(|e| StoreError::TomlEncode(e.to_string()))
            }
            StoreFormat::Json => Ok(serde_json::to_string_pretty(groups)?),
        }
    }
}

impl Store for FileStore {
    fn read(&self) -> StoreResult<DateGroups> {
        if !self.path.exists() {
            debug!("Store {} does not exist yet", self.path.display());
            return Ok(DateGroups::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        self.decode(&content)
    }

    fn write(&self, groups: &DateGroups) -> StoreResult<()> {
        let content = self.encode(groups)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write the temp file, then rename (atomic on the same filesystem)
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), groups = groups.len(), "Wrote store");
        Ok(())
    }
}

/// Create a shared file store
pub fn create_file_store(path: impl Into<PathBuf>, format: StoreFormat) -> SharedStore {
    Arc::new(FileStore::new(path, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nin_core::{ItemRecord, Todo, TodoOptions, UNDATED_KEY};
    use tempfile::TempDir;

    fn record(id: u32, desc: &str, uid: Option<&str>) -> ItemRecord {
        ItemRecord {
            id,
            desc: desc.to_string(),
            tags: vec!["home".to_string()],
            uid: uid.map(str::to_string),
            completed: id % 2 == 0,
            archived: false,
        }
    }

    fn sample() -> DateGroups {
        let mut groups = DateGroups::new();
        groups.insert("2024-05-10".to_string(), vec![record(1, "water plants", None), record(2, "rent", Some("ext-2"))]);
        groups.insert(UNDATED_KEY.to_string(), vec![record(3, "learn piano", None)]);
        groups
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("todos.toml"), StoreFormat::Toml);

        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_toml_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("todos.toml");
        let store = FileStore::new(&path, StoreFormat::Toml);

        store.write(&sample()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(store.read().unwrap(), sample());
    }

    #[test]
    fn test_json_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("todos.json"), StoreFormat::Json);

        store.write(&sample()).unwrap();

        assert_eq!(store.read().unwrap(), sample());
    }

    #[test]
    fn test_reads_hand_written_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.toml");
        std::fs::write(
            &path,
            r#"
[["2024-05-11"]]
id = "7"
desc = "Fake Task 7 desc"
tags = ["school"]
completed = true
archived = false
"#,
        )
        .unwrap();

        let groups = FileStore::from_path(&path).read().unwrap();

        let items = &groups["2024-05-11"];
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 7);
        assert!(items[0].completed);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = FileStore::from_path(&path).read().unwrap_err();

        assert!(matches!(err, StoreError::TomlDecode(_)));
    }

    #[test]
    fn test_empty_collection_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("todos.toml"), StoreFormat::Toml);

        store.write(&DateGroups::new()).unwrap();

        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_from_path_detects_format() {
        assert_eq!(FileStore::from_path("a/todos.json").format(), StoreFormat::Json);
        assert_eq!(FileStore::from_path("a/todos.toml").format(), StoreFormat::Toml);
        assert_eq!(FileStore::from_path("a/todos").format(), StoreFormat::Toml);
    }

    #[test]
    fn test_engine_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.toml");

        {
            let mut todo =
                Todo::new(create_file_store(&path, StoreFormat::Toml), TodoOptions::default()).unwrap();
            todo.add("buy milk", None, vec![]).unwrap();
            todo.add("pay rent", chrono::NaiveDate::from_ymd_opt(2024, 5, 1), vec!["bills".to_string()])
                .unwrap();
            todo.complete(&[2]).unwrap();
        }

        let todo = Todo::new(create_file_store(&path, StoreFormat::Toml), TodoOptions::default()).unwrap();
        assert_eq!(todo.items().ids(), vec![1, 2]);
        let rent = todo.items().find_by_id(2).unwrap();
        assert!(rent.completed);
        assert_eq!(rent.tags, vec!["bills".to_string()]);
    }
}
