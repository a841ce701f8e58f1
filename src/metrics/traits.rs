//! Prometheus-backed `MetricsRecorder`

use crate::metrics_core::MetricsRecorder;

/// Forwards every recorder call to the global `METRICS` registry
pub struct PrometheusMetricsWrapper;

impl MetricsRecorder for PrometheusMetricsWrapper {
    fn observe_lookup_duration(&self, status: &str, duration_ms: f64) {
        super::METRICS.observe_lookup_duration(status, duration_ms);
    }

    fn inc_dataset_miss(&self, dataset: &str) {
        super::METRICS.inc_dataset_miss(dataset);
    }

    fn set_asn_dataset_loaded(&self, loaded: bool) {
        super::METRICS.set_asn_dataset_loaded(loaded);
    }
}
