//! objcache: two-tier object cache
//!
//! # Features
//!
//! - **Runtime tier** of process-local values in front of a shared store
//! - **Group routing**: global groups shared across tenants, non-persistent
//!   groups that never leave the process
//! - **Derived keys** from salt, scope, group and raw key
//! - **Counters, add/replace and bulk writes** built from plain store commands
//! - **Pluggable serialization** (JSON, MessagePack, Bincode)
//!
//! Store failures never surface as errors: writes report `false`, reads miss
//! and counters return `None`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use objcache::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = ObjectCache::new(MemoryStore::new(), CacheConfig::tenant("1"));
//!
//!     cache.set("greeting", "hello", "default", 60).await;
//!
//!     match cache.get("greeting", "default").await {
//!         CacheResult::Hit(value) => println!("Got: {:?}", value),
//!         CacheResult::Miss => println!("Cache miss"),
//!     }
//!
//!     cache.set("views", 1, "counts", 0).await;
//!     assert_eq!(cache.increment("views", 3, "counts").await, Some(4));
//! }
//! ```

mod cache;
mod config;
mod global;

// Re-export core
pub use objcache_core::*;

// Re-export storage
#[cfg(feature = "memory")]
pub use objcache_storage::{MemoryStore, StoreStats};

#[cfg(feature = "redis")]
pub use objcache_storage::{RedisConfig, RedisStore};

pub use cache::{CacheGroup, Loader, ObjectCache};
pub use config::CacheConfig;
pub use global::{SharedObjectCache, global, init_global};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CacheConfig, CacheError, CacheKey, CacheResult, CacheValue, JsonSerializer,
        KeyValueStore, ObjectCache, Result, Scope, Serializer, WireCodec,
    };

    #[cfg(feature = "memory")]
    pub use crate::MemoryStore;

    #[cfg(feature = "redis")]
    pub use crate::{RedisConfig, RedisStore};

    #[cfg(feature = "msgpack")]
    pub use crate::MsgPackSerializer;

    #[cfg(feature = "bincode")]
    pub use crate::BincodeSerializer;
}
