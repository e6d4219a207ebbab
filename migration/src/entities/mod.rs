pub mod url_analytics;
pub mod url_record;

pub use url_analytics::Entity as UrlAnalyticsEntity;
pub use url_record::Entity as UrlRecordEntity;
