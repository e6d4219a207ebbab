use crate::analytics::{AccessEvent, AnalyticsEvent};
use crate::storage::UrlRecord;
use migration::entities::{url_analytics, url_record};

/// 将 Sea-ORM Model 转换为 UrlRecord
pub fn model_to_record(model: url_record::Model) -> UrlRecord {
    UrlRecord {
        id: model.id,
        short_code: model.short_code,
        original_url: model.original_url,
        created_at: model.created_at,
        access_count: model.access_count.max(0) as u64,
        last_accessed_at: model.last_accessed_at,
    }
}

/// 新建记录的 ActiveModel：id 由数据库分配，计数从 0 开始
pub fn new_record_active_model(short_code: &str, original_url: &str) -> url_record::ActiveModel {
    use sea_orm::ActiveValue::*;

    url_record::ActiveModel {
        id: NotSet,
        short_code: Set(short_code.to_string()),
        original_url: Set(original_url.to_string()),
        created_at: Set(chrono::Utc::now()),
        access_count: Set(0),
        last_accessed_at: Set(None),
    }
}

pub fn model_to_event(model: url_analytics::Model) -> AnalyticsEvent {
    AnalyticsEvent {
        id: model.id,
        url_id: model.url_id,
        accessed_at: model.accessed_at,
        user_agent: model.user_agent,
        ip_address: model.ip_address,
        referrer: model.referrer,
    }
}

pub fn event_to_active_model(event: AccessEvent) -> url_analytics::ActiveModel {
    use sea_orm::ActiveValue::*;

    url_analytics::ActiveModel {
        id: NotSet,
        url_id: Set(event.url_id),
        accessed_at: Set(chrono::Utc::now()),
        user_agent: Set(event.user_agent),
        ip_address: Set(event.ip_address),
        referrer: Set(event.referrer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RequestMeta;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_record() {
        let now = Utc::now();
        let model = url_record::Model {
            id: 7,
            short_code: "aB3dE9x".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: now,
            access_count: 42,
            last_accessed_at: Some(now),
        };

        let record = model_to_record(model);
        assert_eq!(record.id, 7);
        assert_eq!(record.short_code, "aB3dE9x");
        assert_eq!(record.access_count, 42);
        assert_eq!(record.last_accessed_at, Some(now));
    }

    #[test]
    fn test_negative_count_clamped() {
        let model = url_record::Model {
            id: 1,
            short_code: "zzzzzzz".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: Utc::now(),
            access_count: -5,
            last_accessed_at: None,
        };
        assert_eq!(model_to_record(model).access_count, 0);
    }

    #[test]
    fn test_new_record_active_model() {
        let active = new_record_active_model("abc1234", "https://rust-lang.org");
        assert!(matches!(active.id, ActiveValue::NotSet));
        assert_eq!(active.short_code, ActiveValue::Set("abc1234".to_string()));
        assert_eq!(active.access_count, ActiveValue::Set(0));
        assert_eq!(active.last_accessed_at, ActiveValue::Set(None));
    }

    #[test]
    fn test_event_keeps_empty_metadata() {
        let event = AccessEvent::new(3, RequestMeta::default());
        let active = event_to_active_model(event);
        assert_eq!(active.url_id, ActiveValue::Set(3));
        assert_eq!(active.user_agent, ActiveValue::Set(String::new()));
        assert_eq!(active.ip_address, ActiveValue::Set(String::new()));
        assert_eq!(active.referrer, ActiveValue::Set(String::new()));
    }
}
