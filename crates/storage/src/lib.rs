// nin Storage Layer
//
// Store and integrated client backends for the nin engine

pub mod client;
pub mod file;
pub mod memory;

pub use client::JsonFileClient;
pub use file::{create_file_store, FileStore};
pub use memory::{create_memory_store, MemoryStore};

use nin_core::{IntegratedClient, IntegrationConfig, SharedStore, StoreConfig};
use std::sync::Arc;

/// Build the store described by `config`
pub fn create_store(config: &StoreConfig) -> SharedStore {
    create_file_store(config.resolved_path(), config.format)
}

/// Build the integrated client described by `config`
pub fn create_client(config: &IntegrationConfig) -> Arc<dyn IntegratedClient> {
    Arc::new(JsonFileClient::new(config.import_path.clone()))
}
