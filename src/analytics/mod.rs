pub mod sink;

pub use sink::AnalyticsLog;

use chrono::{DateTime, Utc};

/// Request metadata captured at redirect time.
///
/// Missing headers are stored as empty strings, never NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// 用户代理 (User-Agent header)
    pub user_agent: String,
    /// 客户端 IP 地址
    pub ip_address: String,
    /// 来源页面 (Referer header)
    pub referrer: String,
}

/// 待写入的访问事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    /// urls.id of the resolved record
    pub url_id: i64,
    pub user_agent: String,
    pub ip_address: String,
    pub referrer: String,
}

impl AccessEvent {
    pub fn new(url_id: i64, meta: RequestMeta) -> Self {
        Self {
            url_id,
            user_agent: meta.user_agent,
            ip_address: meta.ip_address,
            referrer: meta.referrer,
        }
    }
}

/// 已持久化的访问事件
#[derive(Debug, Clone)]
pub struct AnalyticsEvent {
    pub id: i64,
    pub url_id: i64,
    pub accessed_at: DateTime<Utc>,
    pub user_agent: String,
    pub ip_address: String,
    pub referrer: String,
}
