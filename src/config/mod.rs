//! Application configuration and constants.
//!
//! This module provides:
//! - Default values and fixed limits
//! - The library `Config` and the clap-driven `Opt`

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
