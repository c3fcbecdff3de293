//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `jsharvest` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use jsharvest::app::print_batch_summary;
use jsharvest::initialization::init_logger_with;
use jsharvest::{run_batch, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_batch(&config).await {
        Ok(report) => {
            print_batch_summary(&report);
            if report.succeeded() == 0 {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("jsharvest error: {:#}", e);
            process::exit(1);
        }
    }
}
