//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus text format at `metrics.path`.

use actix_web::{HttpResponse, Responder, web};
use tracing::error;

use super::AppStartTime;
use crate::metrics::METRICS;

/// Metrics service handler
pub struct MetricsService;

impl MetricsService {
    /// Handle metrics export request
    pub async fn metrics(app_start_time: web::Data<AppStartTime>) -> impl Responder {
        // Update uptime
        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as f64;
        METRICS.uptime_seconds.set(uptime);

        match METRICS.export() {
            Ok(output) => HttpResponse::Ok()
                .content_type("text/plain; version=0.0.4; charset=utf-8")
                .body(output),
            Err(e) => {
                error!("Failed to export metrics: {}", e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error\n")
            }
        }
    }
}

/// 指标路由，必须注册在查询路由之前
pub fn metrics_routes(path: &str) -> actix_web::Resource {
    web::resource(path).route(web::get().to(MetricsService::metrics))
}
