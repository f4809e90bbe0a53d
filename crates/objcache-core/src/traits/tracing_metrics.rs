use crate::{CacheMetrics, CacheOperation, CacheTier};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Metrics adapter that reports cache activity as `tracing` events
///
/// Hits and misses are `debug`, latencies `trace`, absorbed store errors
/// `warn`. Operations slower than the configured threshold are promoted to
/// `warn` so a struggling store shows up without enabling trace output.
#[derive(Debug, Clone, Default)]
pub struct TracingMetrics {
    service: Option<String>,
    slow_threshold: Option<Duration>,
}

impl TracingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag every event with a service name
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service = Some(name.into());
        self
    }

    /// Warn about operations that take at least `threshold`
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = Some(threshold);
        self
    }

    fn service(&self) -> &str {
        self.service.as_deref().unwrap_or("")
    }

    fn is_slow(&self, duration: Duration) -> bool {
        self.slow_threshold.is_some_and(|limit| duration >= limit)
    }
}

impl CacheMetrics for TracingMetrics {
    fn record_hit(&self, key: &str, tier: CacheTier) {
        debug!(
            target: "objcache",
            service = self.service(),
            key = %key,
            tier = tier.as_str(),
            "hit"
        );
    }

    fn record_miss(&self, key: &str) {
        debug!(target: "objcache", service = self.service(), key = %key, "miss");
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        let micros = duration.as_micros() as u64;
        if self.is_slow(duration) {
            warn!(
                target: "objcache",
                service = self.service(),
                operation = operation.as_str(),
                duration_us = micros,
                "slow cache operation"
            );
        } else {
            trace!(
                target: "objcache",
                service = self.service(),
                operation = operation.as_str(),
                duration_us = micros,
                "latency"
            );
        }
    }

    fn record_backend_error(&self, operation: CacheOperation) {
        warn!(
            target: "objcache",
            service = self.service(),
            operation = operation.as_str(),
            "store error absorbed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(max_level: Level, f: impl FnOnce()) -> String {
        let out = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(out.clone())
            .with_max_level(max_level)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        out.text()
    }

    #[test]
    fn test_hits_and_misses_are_debug_events() {
        let metrics = TracingMetrics::new().with_service_name("shop");

        let text = capture(Level::DEBUG, || {
            metrics.record_hit("1:posts:7", CacheTier::Runtime);
            metrics.record_miss("1:posts:8");
        });

        assert!(text.contains("hit"));
        assert!(text.contains("1:posts:7"));
        assert!(text.contains("runtime"));
        assert!(text.contains("miss"));
        assert!(text.contains("shop"));

        let quiet = capture(Level::INFO, || metrics.record_miss("1:posts:8"));
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_backend_errors_warn() {
        let metrics = TracingMetrics::new();
        let text = capture(Level::WARN, || {
            metrics.record_backend_error(CacheOperation::Increment)
        });

        assert!(text.contains("WARN"));
        assert!(text.contains("store error absorbed"));
        assert!(text.contains("increment"));
    }

    #[test]
    fn test_slow_operations_are_promoted_to_warn() {
        let metrics = TracingMetrics::new().with_slow_threshold(Duration::from_millis(50));

        let text = capture(Level::WARN, || {
            metrics.record_latency(CacheOperation::Get, Duration::from_millis(1));
            metrics.record_latency(CacheOperation::Set, Duration::from_millis(80));
        });

        assert!(text.contains("slow cache operation"));
        assert!(text.contains("\"set\""));
        assert!(!text.contains("\"get\""));
    }
}
