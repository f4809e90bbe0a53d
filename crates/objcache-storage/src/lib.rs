//! objcache-storage: Key-value store implementations for objcache

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "memory")]
pub use memory::{MemoryStore, StoreStats};

#[cfg(feature = "redis")]
pub use redis::{RedisConfig, RedisStore};
