//! Lookup service
//!
//! Two-stage query against the city dataset (mandatory) and the ASN
//! dataset (optional). Dataset errors never fail the request: they are
//! logged and turn into empty field groups.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::warn;

use super::geoip::GeoIpDatabases;
use super::models::{CityFacts, LookupResult, NetworkFacts};
use crate::metrics_core::MetricsRecorder;

/// 查询服务（启动时构造一次，请求间只读共享）
pub struct LookupService {
    databases: GeoIpDatabases,
    locale: String,
    metrics: Arc<dyn MetricsRecorder>,
}

impl LookupService {
    pub fn new(
        databases: GeoIpDatabases,
        locale: impl Into<String>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        metrics.set_asn_dataset_loaded(databases.has_asn());
        Self {
            databases,
            locale: locale.into(),
            metrics,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn metrics(&self) -> Arc<dyn MetricsRecorder> {
        Arc::clone(&self.metrics)
    }

    /// Query both datasets for an already validated address.
    ///
    /// A failed city lookup does not short-circuit: the ASN stage still
    /// runs and the city-derived fields come back empty.
    pub fn lookup(&self, ip: IpAddr) -> LookupResult {
        let city = self.lookup_city(ip);
        let network = self.lookup_network(ip);

        LookupResult::assemble(ip, city, network)
    }

    fn lookup_city(&self, ip: IpAddr) -> Option<CityFacts> {
        match self.databases.city().lookup_city(ip) {
            Ok(record) => Some(CityFacts::from_record(&record, &self.locale)),
            Err(e) => {
                warn!(ip = %ip, error = %e, "Unable to lookup in City database");
                self.metrics.inc_dataset_miss("city");
                None
            }
        }
    }

    fn lookup_network(&self, ip: IpAddr) -> Option<NetworkFacts> {
        // ASN 库未加载：静默跳过
        let asn = self.databases.asn()?;

        match asn.lookup_asn(ip) {
            Ok(record) => Some(NetworkFacts::from(&record)),
            Err(e) => {
                warn!(ip = %ip, error = %e, "Unable to lookup in ASN database");
                self.metrics.inc_dataset_miss("asn");
                None
            }
        }
    }
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("databases", &self.databases)
            .field("locale", &self.locale)
            .finish()
    }
}
