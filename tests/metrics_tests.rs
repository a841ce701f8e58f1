//! Metrics module tests
//!
//! These tests require the `metrics` feature to be enabled:
//!   cargo test --features metrics --test metrics_tests

// Only compile when the metrics feature is enabled
#![cfg(feature = "metrics")]

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use ipinfo::api::services::{AppStartTime, metrics_routes};
use ipinfo::metrics::{METRICS, PrometheusMetricsWrapper};
use ipinfo::metrics_core::{MetricsRecorder, NoopMetrics};

// =============================================================================
// NoopMetrics Tests
// =============================================================================

#[test]
fn test_noop_metrics_implements_trait() {
    let noop = NoopMetrics::new();
    // All methods should be callable without panic
    noop.observe_lookup_duration("200", 0.4);
    noop.inc_dataset_miss("city");
    noop.set_asn_dataset_loaded(false);

    let arc = NoopMetrics::arc();
    arc.inc_dataset_miss("asn");
}

// =============================================================================
// Prometheus wrapper
// =============================================================================

#[test]
fn test_wrapper_records_into_registry() {
    let wrapper = PrometheusMetricsWrapper;
    let before = METRICS
        .dataset_misses_total
        .with_label_values(&["asn"])
        .get();

    wrapper.inc_dataset_miss("asn");
    wrapper.observe_lookup_duration("422", 0.2);

    let after = METRICS
        .dataset_misses_total
        .with_label_values(&["asn"])
        .get();
    assert_eq!(after - before, 1.0);
    assert!(
        METRICS
            .lookup_duration_milliseconds
            .with_label_values(&["422"])
            .get_sample_count()
            >= 1
    );
}

#[test]
fn test_asn_loaded_gauge() {
    let wrapper = PrometheusMetricsWrapper;
    wrapper.set_asn_dataset_loaded(true);
    assert_eq!(METRICS.asn_dataset_loaded.get(), 1.0);
    wrapper.set_asn_dataset_loaded(false);
    assert_eq!(METRICS.asn_dataset_loaded.get(), 0.0);
}

// =============================================================================
// Export endpoint
// =============================================================================

#[actix_rt::test]
async fn test_metrics_endpoint_exports_text() {
    PrometheusMetricsWrapper.observe_lookup_duration("200", 1.0);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppStartTime::now()))
            .service(metrics_routes("/metrics")),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get("Content-Type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain; version=0.0.4")
    );

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("ipinfo_lookup_duration_milliseconds"));
    assert!(body.contains("ipinfo_uptime_seconds"));
}
