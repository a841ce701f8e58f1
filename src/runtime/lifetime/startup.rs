use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{SUPPORTED_LOCALES, StaticConfig};
use crate::metrics_core::MetricsRecorder;
use crate::services::{GeoIpDatabases, LookupService};

#[cfg(feature = "metrics")]
use crate::metrics::PrometheusMetricsWrapper;
#[cfg(not(feature = "metrics"))]
use crate::metrics_core::NoopMetrics;

pub struct StartupContext {
    pub lookup_service: Arc<LookupService>,
}

/// 准备服务器启动的上下文
/// 打开 GeoIP 数据库并构造查询服务
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    config
        .geoip
        .validate()
        .context("Invalid geoip configuration")?;

    if !config.geoip.is_supported_locale() {
        warn!(
            "Locale '{}' is not one of {:?}; name fields will be empty",
            config.geoip.locale, SUPPORTED_LOCALES
        );
    }

    // Create metrics instance for dependency injection
    #[cfg(feature = "metrics")]
    let metrics: Arc<dyn MetricsRecorder> = Arc::new(PrometheusMetricsWrapper);
    #[cfg(not(feature = "metrics"))]
    let metrics: Arc<dyn MetricsRecorder> = NoopMetrics::arc();

    let databases = GeoIpDatabases::open(&config.geoip).with_context(|| {
        format!(
            "Failed to open city database {}",
            config.geoip.city_path().display()
        )
    })?;
    info!(
        "GeoIP datasets ready: {:?} (locale: {})",
        databases, config.geoip.locale
    );

    let lookup_service = Arc::new(LookupService::new(
        databases,
        config.geoip.locale.clone(),
        metrics,
    ));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { lookup_service })
}
