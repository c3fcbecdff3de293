//! Batch runs over several targets.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use log::{error, info};

use super::{scrape_target, SessionReport};
use crate::app::load_targets;
use crate::config::Config;
use crate::error_handling::SessionError;

/// The result of one target of a batch.
#[derive(Debug)]
pub struct TargetOutcome {
    /// The target as given on the command line or in the URL file
    pub target: String,
    pub result: Result<SessionReport, SessionError>,
}

/// Results of a batch run, one outcome per target in input order.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<TargetOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total_saved(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|report| report.saved)
            .sum()
    }
}

/// Runs every target of `config` in turn.
///
/// A failing target is logged and recorded; the batch moves on to the next.
///
/// # Errors
///
/// Fails only if the targets cannot be loaded or there are none.
pub async fn run_batch(config: &Config) -> Result<BatchReport> {
    let targets = load_targets(config).await?;
    if targets.is_empty() {
        bail!("No target URLs given: pass a URL or --url-file");
    }
    info!("Processing {} target(s)", targets.len());

    let started = Instant::now();
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        let result = scrape_target(&target, config).await;
        if let Err(e) = &result {
            error!("❌ Failed to process {target}: {e}");
        }
        outcomes.push(TargetOutcome { target, result });
    }

    Ok(BatchReport {
        outcomes,
        elapsed: started.elapsed(),
    })
}
