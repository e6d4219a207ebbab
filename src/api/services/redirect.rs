//! `GET /{code}`

use std::borrow::Cow;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{error, trace};

use crate::analytics::RequestMeta;
use crate::services::RedirectService;
use crate::utils::ip::extract_client_ip;

pub struct RedirectHandler;

impl RedirectHandler {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<Arc<RedirectService>>,
    ) -> HttpResponse {
        let code = path.into_inner();
        let meta = Self::request_meta(&req, service.settings().trust_forwarded_for);

        match service.resolve(&code, meta).await {
            // 后台写入任务不等待
            Ok(resolution) => {
                let location = encode_location(&resolution.original_url).into_owned();
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header(("Location", location))
                    .finish()
            }
            Err(e) if e.http_status() == StatusCode::NOT_FOUND => {
                trace!("Redirect target not found: {}", code);
                Self::text_response(StatusCode::NOT_FOUND, "URL not found")
            }
            Err(e) => {
                error!("Redirect failed for {} [{}]: {}", code, e.code(), e);
                Self::text_response(e.http_status(), "Server error")
            }
        }
    }

    /// Analytics metadata; absent headers become empty strings
    fn request_meta(req: &HttpRequest, trust_forwarded_for: bool) -> RequestMeta {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        };

        RequestMeta {
            user_agent: header("user-agent").unwrap_or_default(),
            ip_address: extract_client_ip(req, trust_forwarded_for),
            referrer: header("referer")
                .or_else(|| header("referrer"))
                .unwrap_or_default(),
        }
    }

    fn text_response(status: StatusCode, body: &'static str) -> HttpResponse {
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}

/// Percent-encode the bytes that cannot appear raw in a `Location` header.
///
/// Reserved characters and existing `%XX` escapes pass through, so a URL
/// that is already header-safe comes back borrowed and unchanged.
pub fn encode_location(url: &str) -> Cow<'_, str> {
    if url.bytes().all(is_location_safe) {
        return Cow::Borrowed(url);
    }

    let mut encoded = String::with_capacity(url.len() + 8);
    for b in url.bytes() {
        if is_location_safe(b) {
            encoded.push(b as char);
        } else {
            encoded.push_str(&format!("%{:02X}", b));
        }
    }
    Cow::Owned(encoded)
}

#[inline]
fn is_location_safe(b: u8) -> bool {
    b.is_ascii_graphic()
        && !matches!(
            b,
            b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}'
        )
}

/// Catch-all single-segment route; must be registered last
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("").route("/{code}", web::get().to(RedirectHandler::handle_redirect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_request_meta_reads_headers() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.5:5000".parse().unwrap())
            .insert_header(("User-Agent", "curl/8.0"))
            .insert_header(("Referer", "https://news.example/"))
            .to_http_request();

        let meta = RedirectHandler::request_meta(&req, false);
        assert_eq!(meta.user_agent, "curl/8.0");
        assert_eq!(meta.referrer, "https://news.example/");
        assert_eq!(meta.ip_address, "192.0.2.5");
    }

    #[test]
    fn test_request_meta_forwarded_only_when_trusted() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.5:5000".parse().unwrap())
            .insert_header(("X-Forwarded-For", "203.0.113.9"))
            .to_http_request();

        assert_eq!(RedirectHandler::request_meta(&req, false).ip_address, "192.0.2.5");
        assert_eq!(RedirectHandler::request_meta(&req, true).ip_address, "203.0.113.9");
    }

    #[test]
    fn test_request_meta_referrer_fallback() {
        let req = TestRequest::default()
            .insert_header(("Referrer", "https://alt.example/"))
            .to_http_request();
        assert_eq!(
            RedirectHandler::request_meta(&req, false).referrer,
            "https://alt.example/"
        );
    }

    #[test]
    fn test_request_meta_defaults_to_empty() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(RedirectHandler::request_meta(&req, false), RequestMeta::default());
    }

    #[test]
    fn test_encode_location_leaves_safe_urls_alone() {
        for url in [
            "https://example.com",
            "https://example.com/a?b=c&d=%20e#frag",
            "mailto:someone@example.com",
            "http://[::1]:8080/x",
        ] {
            assert!(matches!(encode_location(url), Cow::Borrowed(_)), "{url}");
        }
    }

    #[test]
    fn test_encode_location_escapes_unsafe_bytes() {
        assert_eq!(encode_location("https://example.com/a\nb"), "https://example.com/a%0Ab");
        assert_eq!(encode_location("https://example.com/a\tb"), "https://example.com/a%09b");
        assert_eq!(encode_location("https://example.com/a b"), "https://example.com/a%20b");
        assert_eq!(encode_location("https://example.com/ü"), "https://example.com/%C3%BC");
        assert_eq!(encode_location("https://example.com/{x}"), "https://example.com/%7Bx%7D");
    }
}
