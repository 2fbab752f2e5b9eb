//! In-memory store implementation
//!
//! Keeps the date-keyed mapping for the life of the process

use nin_core::{DateGroups, SharedStore, Store, StoreError, StoreResult};
use std::sync::{Arc, Mutex};

/// In-memory store implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: Mutex<DateGroups>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing mapping
    pub fn with_groups(groups: DateGroups) -> Self {
        Self {
            groups: Mutex::new(groups),
            writes: Mutex::new(0),
        }
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|count| *count).unwrap_or(0)
    }
}

impl Store for MemoryStore {
    fn read(&self) -> StoreResult<DateGroups> {
        let groups = self.groups.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(groups.clone())
    }

    fn write(&self, groups: &DateGroups) -> StoreResult<()> {
        let mut current = self.groups.lock().map_err(|_| StoreError::LockPoisoned)?;
        *current = groups.clone();
        let mut writes = self.writes.lock().map_err(|_| StoreError::LockPoisoned)?;
        *writes += 1;
        Ok(())
    }
}

/// Create a new shared in-memory store
pub fn create_memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}
