//! Metrics trait for cache observability

use std::time::Duration;

/// Tier that served a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTier {
    /// In-process runtime tier
    Runtime,
    /// External store
    Backend,
}

impl CacheTier {
    /// Get tier as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTier::Runtime => "runtime",
            CacheTier::Backend => "backend",
        }
    }
}

/// Facade operation for latency and error labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOperation {
    Add,
    Set,
    Replace,
    Get,
    Delete,
    Increment,
    Decrement,
    Flush,
}

impl CacheOperation {
    /// Get operation as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::Add => "add",
            CacheOperation::Set => "set",
            CacheOperation::Replace => "replace",
            CacheOperation::Get => "get",
            CacheOperation::Delete => "delete",
            CacheOperation::Increment => "increment",
            CacheOperation::Decrement => "decrement",
            CacheOperation::Flush => "flush",
        }
    }
}

/// Trait for cache metrics/observability
///
/// Implement this to integrate with your metrics system (Prometheus, StatsD, etc.)
pub trait CacheMetrics: Send + Sync + 'static {
    /// Record a hit and the tier that served it
    fn record_hit(&self, key: &str, tier: CacheTier);

    /// Record a miss
    fn record_miss(&self, key: &str);

    /// Record operation latency
    fn record_latency(&self, operation: CacheOperation, duration: Duration);

    /// Record a backend error that was absorbed into a failure result
    fn record_backend_error(&self, operation: CacheOperation);
}

/// No-op metrics implementation (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {
    #[inline]
    fn record_hit(&self, _key: &str, _tier: CacheTier) {}

    #[inline]
    fn record_miss(&self, _key: &str) {}

    #[inline]
    fn record_latency(&self, _operation: CacheOperation, _duration: Duration) {}

    #[inline]
    fn record_backend_error(&self, _operation: CacheOperation) {}
}

/// Metrics adapter using the `metrics` crate
///
/// # Example
/// ```ignore
/// use objcache_core::MetricsCrateAdapter;
///
/// // Set up a metrics recorder (e.g., prometheus_exporter)
/// // metrics::set_global_recorder(recorder);
///
/// let metrics = MetricsCrateAdapter::new("objcache");
/// // Emits: objcache_hits_total, objcache_misses_total, etc.
/// ```
#[cfg(feature = "metrics")]
#[derive(Debug, Clone)]
pub struct MetricsCrateAdapter {
    prefix: String,
}

#[cfg(feature = "metrics")]
impl MetricsCrateAdapter {
    /// Create a new adapter with the given metric name prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn metric_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

#[cfg(feature = "metrics")]
impl CacheMetrics for MetricsCrateAdapter {
    fn record_hit(&self, _key: &str, tier: CacheTier) {
        metrics::counter!(self.metric_name("hits_total"), "tier" => tier.as_str()).increment(1);
    }

    fn record_miss(&self, _key: &str) {
        metrics::counter!(self.metric_name("misses_total")).increment(1);
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        metrics::histogram!(
            self.metric_name("operation_duration_seconds"),
            "operation" => operation.as_str()
        )
        .record(duration.as_secs_f64());
    }

    fn record_backend_error(&self, operation: CacheOperation) {
        metrics::counter!(
            self.metric_name("backend_errors_total"),
            "operation" => operation.as_str()
        )
        .increment(1);
    }
}
