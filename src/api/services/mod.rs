pub mod lookup;
#[cfg(feature = "metrics")]
pub mod metrics;

pub use lookup::{LookupHandler, lookup_routes};
#[cfg(feature = "metrics")]
pub use metrics::{MetricsService, metrics_routes};

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}
