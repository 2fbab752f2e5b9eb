//! Engine errors

use crate::client::ClientError;
use crate::item::ItemId;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("No free item id left")]
    IdsExhausted,

    #[error("No integrated client configured")]
    NoIntegratedClient,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Integrated client error: {0}")]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, TodoError>;
