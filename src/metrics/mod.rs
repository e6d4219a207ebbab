//! Prometheus metrics module
//!
//! Provides metrics collection and export for monitoring. A single
//! [`Metrics`] instance is built at startup and shared through
//! `Arc<dyn MetricsRecorder>`.

mod registry;
mod traits;

pub use registry::Metrics;
pub use traits::{MetricsRecorder, NoopMetrics};
