//! HTTP surface
//!
//! Route registration is shared by the server and the integration tests
//! through [`configure_routes`].

pub mod middleware;
pub mod services;

use actix_web::{HttpResponse, error::InternalError, http::StatusCode, web};
use serde_json::json;
use tracing::debug;

use services::{MetricsService, ShortenService, StatsService, redirect_routes};

/// Largest accepted JSON body (bytes)
const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON error body: `{"error": "..."}`
pub fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

/// Body extractor config: malformed JSON becomes a 400 with a JSON error body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            debug!("Rejected request body: {}", err);
            let response = json_error(StatusCode::BAD_REQUEST, "Invalid JSON body");
            InternalError::from_response(err, response).into()
        })
}

/// Register every route.
///
/// `/api` and `/metrics` are registered before the catch-all code route so
/// they are never looked up as short codes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("/shorten", web::post().to(ShortenService::shorten))
            .route("/stats/{code}", web::get().to(StatsService::stats)),
    )
    .service(web::resource("/metrics").route(web::get().to(MetricsService::metrics)))
    .service(redirect_routes());
}
