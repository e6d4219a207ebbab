use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::metrics::Metrics;
use crate::services::{RedirectService, ServiceSettings};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::utils::RandomCodeGenerator;

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub metrics: Arc<Metrics>,
    pub service: Arc<RedirectService>,
}

/// 准备服务器启动的上下文
/// 包括存储、指标和业务服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let metrics = Arc::new(Metrics::new().context("Failed to create metrics registry")?);

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let service = Arc::new(build_service(storage.clone(), metrics.clone(), config));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        metrics,
        service,
    })
}

/// Wire a [`RedirectService`] over one storage instance
pub fn build_service(
    storage: Arc<SeaOrmStorage>,
    metrics: Arc<Metrics>,
    config: &StaticConfig,
) -> RedirectService {
    RedirectService::new(
        storage.clone(),
        storage,
        Arc::new(RandomCodeGenerator),
        metrics,
        ServiceSettings::from_config(config),
    )
}
