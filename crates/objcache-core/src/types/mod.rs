//! Core types for cache operations

mod result;
mod stats;

pub use result::CacheResult;
pub use stats::CacheStats;
