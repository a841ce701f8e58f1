//! Core metrics traits (always compiled, no feature gate).
//!
//! Provides `MetricsRecorder` trait and `NoopMetrics` so that all modules
//! can accept `Arc<dyn MetricsRecorder>` unconditionally.  When the
//! `metrics` feature is disabled, `NoopMetrics` is injected and the
//! compiler optimises every call to a no-op.

use std::sync::Arc;

/// Trait for recording application metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync).
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ===== Lookup handler =====

    /// Observe lookup request duration, labeled by final HTTP status
    fn observe_lookup_duration(&self, status: &str, duration_ms: f64) {}

    // ===== Datasets =====

    /// Record a failed or missed dataset query (`city` / `asn`)
    fn inc_dataset_miss(&self, dataset: &str) {}

    /// Record whether the optional ASN dataset was loaded at startup
    fn set_asn_dataset_loaded(&self, loaded: bool) {}
}

/// Noop metrics implementation for testing and non-metrics builds.
///
/// All methods do nothing, allowing code to run without Prometheus dependencies.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
