//! Service layer for business logic
//!
//! This module provides the lookup pipeline behind the HTTP handler:
//! dataset access (`geoip`) and response assembly (`lookup_service`).

pub mod geoip;
mod lookup_service;
pub mod models;

pub use geoip::{AsnLookup, CityLookup, GeoIpDatabases, MaxMindDatabase};
pub use lookup_service::LookupService;
pub use models::{CodeName, Location, LookupResult};
