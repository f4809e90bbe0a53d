//! Optional once-per-process cache handle
//!
//! Hosts that cannot thread an `Arc<ObjectCache>` through their call graph
//! install one here at startup. Everything else should take the handle
//! explicitly.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use objcache_core::{CacheError, KeyValueStore, Result};

use crate::ObjectCache;

/// Facade over a type-erased store, the shape the global handle holds
pub type SharedObjectCache = ObjectCache<Arc<dyn KeyValueStore>>;

static GLOBAL: OnceCell<Arc<SharedObjectCache>> = OnceCell::new();

/// Install the process-wide cache
///
/// Fails if a cache was already installed; the first one stays.
pub fn init_global(cache: SharedObjectCache) -> Result<Arc<SharedObjectCache>> {
    let cache = Arc::new(cache);
    GLOBAL
        .set(cache.clone())
        .map_err(|_| CacheError::Internal("global object cache already initialised".into()))?;
    Ok(cache)
}

/// The process-wide cache, if one was installed
pub fn global() -> Option<Arc<SharedObjectCache>> {
    GLOBAL.get().cloned()
}
