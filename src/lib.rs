//! Snaplink - URL shortener with access analytics
//!
//! Maps absolute URLs to 7-character codes, redirects on access and
//! records every resolution in a durable access log.
//!
//! # Architecture
//! - `utils`: code generation, URL validation, client IP extraction
//! - `storage`: SeaORM-backed record store
//! - `analytics`: access log types and trait
//! - `metrics`: Prometheus registry and recorder trait
//! - `services`: create / resolve orchestration
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle
//! - `system`: Logging setup

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
