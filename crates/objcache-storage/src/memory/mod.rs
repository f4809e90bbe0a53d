//! In-memory key-value store

mod store;

pub use store::{MemoryStore, StoreStats};
