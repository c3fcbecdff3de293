//! Session orchestration.
//!
//! A session collects from one target: it owns the ledger and the browsing
//! capability for its whole lifetime, and reduces them to a
//! `SessionReport` at the end.
//!
//! Order of events in `run_session()`:
//! 1. Attach a collector to the root page, then navigate it
//! 2. Settle, so late responses still reach the collector
//! 3. Crawl from the target, if enabled
//! 4. Snapshot the root markup and process its inline scripts
//! 5. Close the root page, drain its collector, release the browser
//! 6. Write `verbose.log` (verbose mode) and build the report
//!
//! Only failing to acquire the browser or a root page is fatal. Everything
//! else is recorded in the ledger and the session carries on.

mod batch;
mod report;

pub use batch::{run_batch, BatchReport, TargetOutcome};
pub use report::{info_block, RunSettings, SessionReport};

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::{info, warn};
use url::Url;

use crate::app::{print_start_banner, validate_and_normalize_url};
use crate::browser::markup::extract_inline_scripts;
use crate::browser::{Browser, HttpBrowser, Page};
use crate::collector::{AssetCollector, InlineSummary, OutputDir};
use crate::config::Config;
use crate::crawl::crawl;
use crate::error_handling::SessionError;
use crate::identity::domain_of;
use crate::ledger::CollectionLedger;

/// Runs one collection session against `target` with an acquired browser.
///
/// `output` must already be prepared. The browser is released before this
/// returns, on every path.
pub async fn run_session<B: Browser>(
    browser: B,
    target: &Url,
    output: OutputDir,
    config: &Config,
) -> Result<SessionReport, SessionError> {
    let started_at = Utc::now();
    let started = Instant::now();

    let ledger = Arc::new(if config.verbose {
        CollectionLedger::with_decision_log()
    } else {
        CollectionLedger::new()
    });
    let output = Arc::new(output);
    let collector = AssetCollector::new(
        Arc::clone(&ledger),
        Arc::clone(&output),
        domain_of(target),
        config,
    );
    info!(
        "🔒 Using {} filtering mode",
        config.filter_mode.as_str().to_uppercase()
    );

    let mut root = match browser.open_page().await {
        Ok(page) => page,
        Err(e) => {
            browser.close().await;
            return Err(e.into());
        }
    };
    let root_collector = collector.attach(&mut root);

    info!("🌐 Navigating to {target}...");
    match root.navigate(target, config.timeout).await {
        Ok(()) => {
            if !config.settle.is_zero() {
                tokio::time::sleep(config.settle).await;
            }
        }
        Err(e) => {
            warn!(
                "⚠️ Navigation issue: {}. Continuing with collected responses.",
                e.user_message()
            );
            ledger.record_error("Initial navigation error", e.to_string());
        }
    }

    let pages_crawled = if config.crawl {
        let stats = crawl(&browser, target, &collector, config).await;
        Some(stats.pages.len())
    } else {
        None
    };

    let inline = match root.current_markup().await {
        Ok(markup) => {
            let scripts = extract_inline_scripts(&markup);
            collector.process_inline_scripts(&scripts).await
        }
        Err(e) => {
            warn!("⚠️ No inline scripts processed for {target}: {e}");
            InlineSummary::default()
        }
    };
    info!(
        "📊 Inline scripts found: {}, saved: {}",
        inline.found, inline.saved
    );

    root.close().await;
    root_collector.finish().await;
    browser.close().await;

    let snapshot = ledger.snapshot();
    if config.verbose {
        match output.write_verbose_log(&snapshot.decisions).await {
            Ok(path) => info!("📝 Decision log written to {}", path.display()),
            Err(e) => warn!("⚠️ {e}"),
        }
    }

    Ok(SessionReport::new(
        target.clone(),
        output.path().to_path_buf(),
        RunSettings::from(config),
        started_at,
        started.elapsed(),
        inline,
        pages_crawled,
        snapshot,
    ))
}

/// Validates `target`, prepares its output directory, launches an
/// `HttpBrowser` and runs a session.
pub async fn scrape_target(target: &str, config: &Config) -> Result<SessionReport, SessionError> {
    let url = validate_and_normalize_url(target)?;
    print_start_banner(&url, config);

    let output = OutputDir::for_session(&config.output_root, &domain_of(&url), config.filter_mode);
    output
        .prepare(config.clear_output)
        .await
        .map_err(|source| SessionError::Output {
            path: output.path().to_path_buf(),
            source,
        })?;

    let browser = HttpBrowser::launch(config)?;
    run_session(browser, &url, output, config).await
}
