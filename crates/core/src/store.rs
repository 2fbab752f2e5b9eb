//! Store contract
//!
//! The store persists a date-keyed mapping of item records. Every write
//! replaces the prior content in full.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::item::ItemRecord;

/// Date key to the ordered records filed under it
pub type DateGroups = BTreeMap<String, Vec<ItemRecord>>;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML decode error: {0}")]
    TomlDecode(String),

    #[error("TOML encode error: {0}")]
    TomlEncode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistent backing for the todo collection
pub trait Store: Send + Sync {
    /// Read the full mapping
    fn read(&self) -> StoreResult<DateGroups>;

    /// Replace the full mapping
    fn write(&self, groups: &DateGroups) -> StoreResult<()>;
}

/// Shared store reference
pub type SharedStore = Arc<dyn Store>;
