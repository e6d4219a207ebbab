pub mod metrics;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use metrics::MetricsService;
pub use redirect::{RedirectHandler, redirect_routes};
pub use shorten::{ShortenRequest, ShortenService};
pub use stats::StatsService;
