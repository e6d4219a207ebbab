//! MetricsRecorder trait for dependency injection
//!
//! This trait abstracts the metrics recording interface, allowing:
//! - Production use with Prometheus metrics
//! - Testing with NoopMetrics or custom mock implementations

use std::sync::Arc;

/// Trait for recording application metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync).
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ===== Shortener =====

    /// Record a successfully created short URL
    fn inc_created(&self) {}

    // ===== Redirect =====

    /// Record a resolved redirect
    fn inc_redirect(&self) {}

    /// Record a lookup for a code that does not exist
    fn inc_not_found(&self) {}

    /// Record the outcome of a background write
    /// (`increment_access` / `analytics_append`, `success` / `failure`)
    fn inc_background_write(&self, operation: &str, status: &str) {}

    // ===== HTTP (timing middleware) =====

    /// Observe HTTP request duration
    fn observe_http_request(&self, method: &str, route: &str, status: &str, duration_secs: f64) {}
}

/// Noop metrics implementation for testing.
///
/// All methods do nothing, allowing tests to run without Prometheus dependencies.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
