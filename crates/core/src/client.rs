//! Integrated client contract
//!
//! An integrated client is an outside source of todo items, matched against
//! local items by `uid` during `sync_down`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Importable item tuple: `(desc, date, tags, uid, completed, archived)`
///
/// Deserializes from either a positional array or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalItem {
    pub desc: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uid: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed client payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outside source of items
pub trait IntegratedClient: Send + Sync {
    fn fetch(&self) -> Result<Vec<ExternalItem>, ClientError>;
}
