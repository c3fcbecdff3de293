//! jsharvest library: JavaScript asset collection
//!
//! This library collects the JavaScript a site serves (external files and
//! inline snippets), drops well-known boilerplate with a regex filter
//! policy, deduplicates by content fingerprint, and optionally crawls
//! same-domain links to a bounded depth. Every surviving asset is written
//! to `output_root/<domain>/<filter-mode>/`.
//!
//! The page-rendering engine is abstracted behind the [`browser::Browser`]
//! and [`browser::Page`] traits; [`browser::HttpBrowser`] is the bundled
//! implementation.
//!
//! # Example
//!
//! ```no_run
//! use jsharvest::{scrape_target, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     crawl: true,
//!     max_depth: 1,
//!     ..Default::default()
//! };
//!
//! let report = scrape_target("https://example.com", &config).await?;
//! println!("{} files saved to {}", report.saved, report.output_dir.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime: collectors handle responses on
//! spawned tasks.

pub mod app;
pub mod browser;
pub mod collector;
pub mod config;
pub mod crawl;
pub mod error_handling;
pub mod filter;
pub mod identity;
pub mod initialization;
pub mod ledger;
pub mod session;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use filter::FilterMode;
pub use session::{run_batch, run_session, scrape_target, BatchReport, SessionReport, TargetOutcome};
