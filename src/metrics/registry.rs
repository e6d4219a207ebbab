//! Metrics registry
//!
//! Defines all Prometheus metrics used in the application.

use std::time::Instant;

use prometheus::{
    Counter, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

use super::MetricsRecorder;
use crate::errors::{Result, SnaplinkError};

/// Histogram buckets for HTTP latency (seconds)
const HTTP_DURATION_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Application metrics container
pub struct Metrics {
    /// Internal Prometheus registry
    registry: Registry,
    started_at: Instant,

    // ===== Shortener metrics =====
    pub urls_created_total: Counter,

    // ===== Redirect metrics =====
    pub redirects_total: Counter,
    pub not_found_total: Counter,
    /// Background increment/append outcomes by operation and status
    pub background_writes_total: CounterVec,

    // ===== HTTP metrics =====
    pub http_request_duration_seconds: HistogramVec,

    // ===== System metrics =====
    /// Server uptime in seconds
    pub uptime_seconds: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let urls_created_total = Counter::new(
            "snaplink_urls_created_total",
            "Total number of short URLs created",
        )?;

        let redirects_total = Counter::new(
            "snaplink_redirects_total",
            "Total number of successful redirects",
        )?;

        let not_found_total = Counter::new(
            "snaplink_not_found_total",
            "Total number of lookups for unknown short codes",
        )?;

        let background_writes_total = CounterVec::new(
            Opts::new(
                "snaplink_background_writes_total",
                "Background writes after a redirect by operation and status",
            ),
            &["operation", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "snaplink_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(HTTP_DURATION_BUCKETS.to_vec()),
            &["method", "route", "status"],
        )?;

        let uptime_seconds = Gauge::new("snaplink_uptime_seconds", "Server uptime in seconds")?;

        // Register all metrics
        registry.register(Box::new(urls_created_total.clone()))?;
        registry.register(Box::new(redirects_total.clone()))?;
        registry.register(Box::new(not_found_total.clone()))?;
        registry.register(Box::new(background_writes_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            started_at: Instant::now(),
            urls_created_total,
            redirects_total,
            not_found_total,
            background_writes_total,
            http_request_duration_seconds,
            uptime_seconds,
        })
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        self.uptime_seconds
            .set(self.started_at.elapsed().as_secs_f64());

        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| SnaplinkError::metrics(format!("Metrics output is not valid UTF-8: {}", e)))
    }
}

impl MetricsRecorder for Metrics {
    fn inc_created(&self) {
        self.urls_created_total.inc();
    }

    fn inc_redirect(&self) {
        self.redirects_total.inc();
    }

    fn inc_not_found(&self) {
        self.not_found_total.inc();
    }

    fn inc_background_write(&self, operation: &str, status: &str) {
        self.background_writes_total
            .with_label_values(&[operation, status])
            .inc();
    }

    fn observe_http_request(&self, method: &str, route: &str, status: &str, duration_secs: f64) {
        self.http_request_duration_seconds
            .with_label_values(&[method, route, status])
            .observe(duration_secs);
    }
}
