//! `POST /api/shorten`

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::error;

use crate::api::json_error;
use crate::services::RedirectService;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// Absent and empty are treated alike
    #[serde(default)]
    pub url: String,
}

pub struct ShortenService;

impl ShortenService {
    pub async fn shorten(
        service: web::Data<Arc<RedirectService>>,
        body: web::Json<ShortenRequest>,
    ) -> HttpResponse {
        match service.create(&body.url).await {
            Ok(created) => HttpResponse::Ok().json(created),
            Err(e) if e.is_internal() => {
                error!("Shorten failed [{}]: {}", e.code(), e);
                json_error(e.http_status(), "Failed to create short URL")
            }
            Err(e) => json_error(e.http_status(), e.message()),
        }
    }
}
