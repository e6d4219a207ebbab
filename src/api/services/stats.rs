//! `GET /api/stats/{code}`

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::error;

use crate::api::json_error;
use crate::services::RedirectService;

pub struct StatsService;

impl StatsService {
    pub async fn stats(
        service: web::Data<Arc<RedirectService>>,
        path: web::Path<String>,
    ) -> HttpResponse {
        let code = path.into_inner();
        match service.stats(&code).await {
            Ok(stats) => HttpResponse::Ok().json(stats),
            Err(e) if e.is_internal() => {
                error!("Stats lookup failed for {} [{}]: {}", code, e.code(), e);
                json_error(e.http_status(), "Server error")
            }
            Err(e) => json_error(e.http_status(), "URL not found"),
        }
    }
}
