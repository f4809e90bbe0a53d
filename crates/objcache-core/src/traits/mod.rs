//! Core traits for cache operations

mod cache_key;
mod codec;
mod metrics;
mod store;
mod tracing_metrics;

pub use cache_key::CacheKey;
pub use codec::{JsonSerializer, MAX_NESTING, Serializer, ValueCodec, WireCodec};
pub use metrics::{CacheMetrics, CacheOperation, CacheTier, NoopMetrics};
pub use store::KeyValueStore;
pub use tracing_metrics::TracingMetrics;

#[cfg(feature = "metrics")]
pub use metrics::MetricsCrateAdapter;

#[cfg(feature = "msgpack")]
pub use codec::MsgPackSerializer;

#[cfg(feature = "bincode")]
pub use codec::BincodeSerializer;
