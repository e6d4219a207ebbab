//! Create and resolve short URLs
//!
//! Orchestrates code generation, the record store, the access log and
//! metrics. Access counting and logging happen off the response path in a
//! spawned task.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::analytics::{AccessEvent, AnalyticsLog, RequestMeta};
use crate::config::StaticConfig;
use crate::errors::{Result, SnaplinkError};
use crate::metrics::MetricsRecorder;
use crate::storage::{RecordStore, UrlRecord, UrlStats};
use crate::utils::url_validator::{validate_url, validation_error_message};
use crate::utils::{CodeGenerator, is_reserved_code, is_valid_short_code};

const OP_INCREMENT: &str = "increment_access";
const OP_APPEND: &str = "analytics_append";

/// Settings the service reads from [`StaticConfig`]
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Prefix of generated short URLs, no trailing slash
    pub base_url: String,
    /// Total insert attempts per create; at least 1
    pub max_code_attempts: u32,
    /// Take the client IP from forwarding headers
    pub trust_forwarded_for: bool,
}

impl ServiceSettings {
    pub fn from_config(config: &StaticConfig) -> Self {
        Self {
            base_url: config.server.public_base_url(),
            max_code_attempts: config.shortener.max_code_attempts,
            trust_forwarded_for: config.server.trust_forwarded_for,
        }
    }
}

/// Result of a successful create, serialized as the shorten response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

/// Result of a successful resolve
///
/// `pending` finishes once the access count and the access log have been
/// written. HTTP handlers drop it; tests await it.
#[derive(Debug)]
pub struct Resolution {
    pub original_url: String,
    pub pending: JoinHandle<()>,
}

pub struct RedirectService {
    store: Arc<dyn RecordStore>,
    analytics: Arc<dyn AnalyticsLog>,
    generator: Arc<dyn CodeGenerator>,
    metrics: Arc<dyn MetricsRecorder>,
    settings: ServiceSettings,
}

impl RedirectService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        analytics: Arc<dyn AnalyticsLog>,
        generator: Arc<dyn CodeGenerator>,
        metrics: Arc<dyn MetricsRecorder>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            store,
            analytics,
            generator,
            metrics,
            settings,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Store `url` under a freshly generated code.
    ///
    /// A collision regenerates the code until `max_code_attempts` inserts
    /// have been tried, then the last `Conflict` is returned. A reserved
    /// code counts as a collision without touching the store.
    #[instrument(skip(self))]
    pub async fn create(&self, url: &str) -> Result<Created> {
        validate_url(url)
            .map_err(|e| SnaplinkError::invalid_input(validation_error_message(&e)))?;

        let attempts = self.settings.max_code_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let code = self.generator.generate();
            if is_reserved_code(&code) {
                warn!(
                    "Generated reserved short code on attempt {}/{}: {}",
                    attempt, attempts, code
                );
                last_err = Some(SnaplinkError::conflict(format!(
                    "Reserved short code: {}",
                    code
                )));
                continue;
            }
            match self.store.insert(&code, url).await {
                Ok(record) => {
                    self.metrics.inc_created();
                    return Ok(self.created_from(record));
                }
                Err(SnaplinkError::Conflict(msg)) => {
                    warn!(
                        "Short code collision on attempt {}/{}: {}",
                        attempt, attempts, code
                    );
                    last_err = Some(SnaplinkError::Conflict(msg));
                }
                Err(e) => {
                    error!("Failed to store short URL: {}", e);
                    return Err(e);
                }
            }
        }

        let err = last_err
            .unwrap_or_else(|| SnaplinkError::conflict("No short code attempts were made"));
        error!("Giving up after {} collisions: {}", attempts, err);
        Err(err)
    }

    /// Look up `code` and schedule the access side effects.
    ///
    /// Returns as soon as the lookup is done; the increment and the log
    /// append run in one background task, each failure logged and counted
    /// on its own.
    #[instrument(skip(self, meta))]
    pub async fn resolve(&self, code: &str, meta: RequestMeta) -> Result<Resolution> {
        if !is_valid_short_code(code) {
            debug!("Rejecting malformed short code: {}", code);
            self.metrics.inc_not_found();
            return Err(SnaplinkError::not_found(format!("URL not found: {}", code)));
        }

        let record = match self.store.lookup_by_code(code).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("Short code not found: {}", code);
                self.metrics.inc_not_found();
                return Err(SnaplinkError::not_found(format!("URL not found: {}", code)));
            }
            Err(e) => {
                error!("Lookup failed for {}: {}", code, e);
                return Err(e);
            }
        };

        let pending = self.spawn_access_writes(&record, meta);
        self.metrics.inc_redirect();

        Ok(Resolution {
            original_url: record.original_url,
            pending,
        })
    }

    pub async fn stats(&self, code: &str) -> Result<UrlStats> {
        self.store
            .get_stats(code)
            .await?
            .ok_or_else(|| SnaplinkError::not_found(format!("URL not found: {}", code)))
    }

    fn created_from(&self, record: UrlRecord) -> Created {
        info!("Created short URL {} for {}", record.short_code, record.original_url);
        Created {
            short_url: format!("{}/{}", self.settings.base_url, record.short_code),
            short_code: record.short_code,
            original_url: record.original_url,
        }
    }

    fn spawn_access_writes(&self, record: &UrlRecord, meta: RequestMeta) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let analytics = Arc::clone(&self.analytics);
        let metrics = Arc::clone(&self.metrics);
        let id = record.id;
        let code = record.short_code.clone();
        let event = AccessEvent::new(id, meta);

        tokio::spawn(async move {
            match store.increment_access(id).await {
                Ok(()) => metrics.inc_background_write(OP_INCREMENT, "success"),
                Err(e) => {
                    error!("Failed to update access count for {}: {}", code, e);
                    metrics.inc_background_write(OP_INCREMENT, "failure");
                }
            }

            // 即使计数失败也要写访问日志
            match analytics.append(event).await {
                Ok(()) => metrics.inc_background_write(OP_APPEND, "success"),
                Err(e) => {
                    error!("Failed to record analytics for {}: {}", code, e);
                    metrics.inc_background_write(OP_APPEND, "failure");
                }
            }
        })
    }
}
