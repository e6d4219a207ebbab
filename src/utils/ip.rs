//! Client IP extraction for access analytics

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 提取客户端 IP
///
/// Uses the TCP peer address unless `trust_forwarded_for` is set, in which
/// case the forwarding headers win. Empty string when nothing is known.
pub fn extract_client_ip(req: &HttpRequest, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for && let Some(ip) = extract_forwarded_ip_from_headers(req.headers()) {
        return ip;
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 或 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    // 优先 X-Forwarded-For（取第一个，即原始客户端 IP）
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(
            extract_forwarded_ip_from_headers(req.headers()).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(
            extract_forwarded_ip_from_headers(req.headers()).as_deref(),
            Some("198.51.100.2")
        );
    }

    #[test]
    fn test_headers_ignored_unless_trusted() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:41000".parse().unwrap())
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req, false), "192.0.2.10");
        assert_eq!(extract_client_ip(&req, true), "203.0.113.7");
    }

    #[test]
    fn test_trusted_without_headers_uses_peer() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:41000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req, true), "192.0.2.10");
    }

    #[test]
    fn test_unknown_peer_is_empty() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_client_ip(&req, false), "");
    }
}
