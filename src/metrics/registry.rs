//! Global metrics registry
//!
//! Defines all Prometheus metrics used by the lookup service.

use once_cell::sync::Lazy;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

use crate::errors::{IpinfoError, Result};

/// Global metrics instance
pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Lookup latency buckets in milliseconds
const LOOKUP_DURATION_BUCKETS_MS: &[f64] = &[
    0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0,
];

/// Application metrics container
pub struct Metrics {
    /// Internal Prometheus registry
    registry: Registry,

    // ===== Lookup metrics =====
    /// Lookup request duration by final HTTP status
    pub lookup_duration_milliseconds: HistogramVec,

    // ===== Dataset metrics =====
    /// Failed or missed dataset queries by dataset (city, asn)
    pub dataset_misses_total: CounterVec,
    /// 1 when the optional ASN dataset was opened at startup
    pub asn_dataset_loaded: Gauge,

    // ===== System metrics =====
    /// Server uptime in seconds
    pub uptime_seconds: Gauge,
}

impl Metrics {
    fn new() -> Self {
        let registry = Registry::new();

        // Lookup metrics
        let lookup_duration_milliseconds = HistogramVec::new(
            HistogramOpts::new(
                "ipinfo_lookup_duration_milliseconds",
                "Lookup request duration in milliseconds by status",
            )
            .buckets(LOOKUP_DURATION_BUCKETS_MS.to_vec()),
            &["status"],
        )
        .expect("Failed to create lookup_duration_milliseconds metric");

        // Dataset metrics
        let dataset_misses_total = CounterVec::new(
            Opts::new(
                "ipinfo_dataset_misses_total",
                "Total failed or missed dataset queries by dataset",
            ),
            &["dataset"],
        )
        .expect("Failed to create dataset_misses_total metric");

        let asn_dataset_loaded = Gauge::new(
            "ipinfo_asn_dataset_loaded",
            "Whether the ASN dataset is loaded (1) or not (0)",
        )
        .expect("Failed to create asn_dataset_loaded metric");

        // System metrics
        let uptime_seconds = Gauge::new("ipinfo_uptime_seconds", "Server uptime in seconds")
            .expect("Failed to create uptime_seconds metric");

        // Register all metrics
        registry
            .register(Box::new(lookup_duration_milliseconds.clone()))
            .expect("Failed to register lookup_duration_milliseconds");
        registry
            .register(Box::new(dataset_misses_total.clone()))
            .expect("Failed to register dataset_misses_total");
        registry
            .register(Box::new(asn_dataset_loaded.clone()))
            .expect("Failed to register asn_dataset_loaded");
        registry
            .register(Box::new(uptime_seconds.clone()))
            .expect("Failed to register uptime_seconds");

        Self {
            registry,
            lookup_duration_milliseconds,
            dataset_misses_total,
            asn_dataset_loaded,
            uptime_seconds,
        }
    }

    pub fn observe_lookup_duration(&self, status: &str, duration_ms: f64) {
        self.lookup_duration_milliseconds
            .with_label_values(&[status])
            .observe(duration_ms);
    }

    pub fn inc_dataset_miss(&self, dataset: &str) {
        self.dataset_misses_total.with_label_values(&[dataset]).inc();
    }

    pub fn set_asn_dataset_loaded(&self, loaded: bool) {
        self.asn_dataset_loaded.set(if loaded { 1.0 } else { 0.0 });
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| IpinfoError::serialization(format!("encode metrics: {}", e)))?;
        String::from_utf8(buffer)
            .map_err(|e| IpinfoError::serialization(format!("metrics output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_registered_families() {
        METRICS.observe_lookup_duration("200", 1.5);
        METRICS.inc_dataset_miss("city");
        METRICS.set_asn_dataset_loaded(true);

        let output = METRICS.export().unwrap();
        assert!(output.contains("ipinfo_lookup_duration_milliseconds_bucket"));
        assert!(output.contains("status=\"200\""));
        assert!(output.contains("ipinfo_dataset_misses_total{dataset=\"city\"}"));
        assert!(output.contains("ipinfo_asn_dataset_loaded 1"));
        assert!(output.contains("ipinfo_uptime_seconds"));
    }
}
