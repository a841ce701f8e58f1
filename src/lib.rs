//! ipinfo - IP address geolocation lookup service
//!
//! Answers `GET /<address>` with the city, region, country, continent,
//! coordinates, postal code and autonomous system of an IPv4/IPv6 address,
//! read from MaxMind GeoLite2 databases. Output is JSON, optionally
//! pretty-printed or wrapped in a JSONP callback.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **metrics**: Prometheus metrics export
//!
//! # Architecture
//! - `utils::ip`: target address resolution from path, header and peer address
//! - `services`: GeoIP dataset access and the lookup service
//! - `api`: HTTP handler, response encoding and per-request instrumentation
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

#[cfg(feature = "server")]
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod metrics_core;
#[cfg(feature = "server")]
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
