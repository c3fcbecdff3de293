//! Banner and summary printing.
//!
//! Blocks go to stdout so they stay readable whatever the log format.

use log::info;
use url::Url;

use crate::config::Config;
use crate::session::{info_block, BatchReport, RunSettings};

/// Prints the start-of-session block.
pub fn print_start_banner(target: &Url, config: &Config) {
    let body = format!(
        "🚀 JS File Downloader Started\nTarget URL:         {target}\n{}",
        RunSettings::from(config)
    );
    println!("{}", info_block(&body));
}

/// Prints each session summary, then a one-line total for the batch.
pub fn print_batch_summary(report: &BatchReport) {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(session) => println!("{session}"),
            Err(e) => println!("{}", info_block(&format!("❌ {}: {e}", outcome.target))),
        }
    }

    let total = report.outcomes.len();
    info!(
        "✅ Processed {} target{} ({} succeeded, {} failed), {} file{} saved in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        report.succeeded(),
        report.failed(),
        report.total_saved(),
        if report.total_saved() == 1 { "" } else { "s" },
        report.elapsed.as_secs_f64()
    );
}
