//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::warn;

use crate::api::configure_routes;
use crate::api::middleware::TimingMiddleware;
use crate::metrics::MetricsRecorder;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// This function:
/// 1. Prepares server components (storage, metrics, service)
/// 2. Configures and starts the HTTP server
/// 3. Listens for the shutdown signal
///
/// **Note**: Configuration and logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = crate::config::get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let metrics = startup.metrics.clone();
    let service = startup.service.clone();
    let db_for_shutdown = startup.storage.get_db().clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        let recorder: std::sync::Arc<dyn MetricsRecorder> = metrics.clone();
        App::new()
            .wrap(TimingMiddleware::new(recorder)) // 最外层，记录请求延迟
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(metrics.clone()))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    warn!(
        "Short URLs will use base {}",
        config.server.public_base_url()
    );
    let server = server.bind(bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
