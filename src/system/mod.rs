//! System-level modules
//!
//! Logging setup for the server process.

pub mod logging;

pub use logging::init_logging;
