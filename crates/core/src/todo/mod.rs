//! Todo module - the collection engine

pub mod engine;

pub use engine::{SyncSummary, Todo, TodoOptions};
