//! HTTP layer: lookup handler, response encoding and request instrumentation

pub mod constants;
pub mod encoding;
pub mod observer;
pub mod services;
