//! Local integrated client
//!
//! Reads importable items from a JSON export on disk. Entries may be
//! positional tuples `[desc, date, tags, uid, completed, archived]` or objects.

use nin_core::{ClientError, ExternalItem, IntegratedClient};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonFileClient {
    path: PathBuf,
}

impl JsonFileClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IntegratedClient for JsonFileClient {
    fn fetch(&self) -> Result<Vec<ExternalItem>, ClientError> {
        let content = std::fs::read_to_string(&self.path)?;
        let items: Vec<ExternalItem> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = items.len(), "Fetched external items");
        Ok(items)
    }
}
