//! Application initialization and resource setup.
//!
//! - Logger (`env_logger` with plain or JSON output)
//! - HTTP client for the HTTP-backed browser

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;
