// nin Core - todo data model and engine
//!
//! Contains:
//! - Item: a single todo entry and its persisted record
//! - Collection: ordered items with id management and queries
//! - Todo: the engine applying mutations with write-through persistence
//! - Store / IntegratedClient / Presenter: collaborator contracts

mod client;
mod collection;
mod config;
mod error;
mod item;
mod presenter;
mod prioritize;
mod store;
pub mod todo;

pub use client::*;
pub use collection::*;
pub use config::*;
pub use error::*;
pub use item::*;
pub use presenter::*;
pub use prioritize::*;
pub use store::*;
pub use todo::{SyncSummary, Todo, TodoOptions};
