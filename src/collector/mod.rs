//! Asset collection.
//!
//! An `AssetCollector` decides for every candidate (a network response or an
//! inline script) whether it is persisted. Candidates pass, in order, the
//! filter policy, the size floor and the ledger claim; only then is a file
//! written. Every failure is recorded in the ledger and never returned to
//! the caller.
//!
//! One collector is attached to each page through `attach()`; it consumes
//! the page's response channel on a background task and handles every
//! response on its own sub-task. All collectors of a session share one
//! `CollectionLedger` and one `OutputDir`.

mod output;

pub use output::OutputDir;

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error};
use tokio::task::{JoinHandle, JoinSet};
use url::Url;

use crate::browser::{NetworkResponse, Page};
use crate::config::Config;
use crate::filter::FilterPolicy;
use crate::identity::{build_filename, build_inline_filename, content_fingerprint, domain_of};
use crate::ledger::{CollectionLedger, SkipReason};

/// Where a candidate asset came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    External(Url),
    Inline { domain: String },
}

impl AssetSource {
    /// Label used in the ledger: the URL, or `inline:<domain>`.
    pub fn label(&self) -> String {
        match self {
            AssetSource::External(url) => url.to_string(),
            AssetSource::Inline { domain } => format!("inline:{domain}"),
        }
    }
}

/// A candidate asset, alive until its persist/skip decision.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub source: AssetSource,
    pub bytes: Vec<u8>,
    pub fingerprint: String,
}

impl AssetRecord {
    pub fn new(source: AssetSource, bytes: Vec<u8>) -> Self {
        let fingerprint = content_fingerprint(&bytes);
        Self {
            source,
            bytes,
            fingerprint,
        }
    }

    pub fn filename(&self) -> String {
        match &self.source {
            AssetSource::External(url) => build_filename(url, &self.bytes),
            AssetSource::Inline { domain } => build_inline_filename(domain, &self.bytes),
        }
    }
}

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a script/fetch/XHR response
    Ignored,
    /// Host differs from the session domain and cross-origin is disabled
    CrossOrigin,
    /// Matched a filter rule
    Uninteresting,
    /// Body could not be read; recorded as an error
    Unreadable,
    TooSmall,
    Duplicate,
    Saved(PathBuf),
    /// Write failed; recorded as an error
    PersistFailed,
}

/// Per-page tally returned by `CollectorHandle::finish`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorSummary {
    pub responses: usize,
    pub saved: usize,
}

/// Tally of one inline-script pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineSummary {
    pub found: usize,
    pub saved: usize,
}

#[derive(Clone)]
pub struct AssetCollector {
    ledger: Arc<CollectionLedger>,
    output: Arc<OutputDir>,
    domain: String,
    policy: &'static FilterPolicy,
    min_size: usize,
    include_cross_origin: bool,
}

impl AssetCollector {
    /// Creates a collector for the session whose target host is `domain`.
    pub fn new(
        ledger: Arc<CollectionLedger>,
        output: Arc<OutputDir>,
        domain: impl Into<String>,
        config: &Config,
    ) -> Self {
        Self {
            ledger,
            output,
            domain: domain.into(),
            policy: FilterPolicy::for_mode(config.filter_mode),
            min_size: config.min_size,
            include_cross_origin: config.include_cross_origin,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn ledger(&self) -> &CollectionLedger {
        &self.ledger
    }

    /// Subscribes to `page` and handles its responses in the background.
    ///
    /// Must be called before the page navigates. The returned handle
    /// completes once the page is closed and every response is handled.
    pub fn attach<P: Page>(&self, page: &mut P) -> CollectorHandle {
        let mut responses = page.subscribe();
        let collector = Arc::new(self.clone());

        let task = tokio::spawn(async move {
            let mut in_flight = JoinSet::new();
            let mut summary = CollectorSummary::default();

            while let Some(response) = responses.recv().await {
                summary.responses += 1;
                let collector = Arc::clone(&collector);
                in_flight.spawn(async move { collector.handle_response(response).await });
            }

            while let Some(result) = in_flight.join_next().await {
                match result {
                    Ok(Outcome::Saved(_)) => summary.saved += 1,
                    Ok(_) => {}
                    Err(e) => error!("Response handler task failed: {e}"),
                }
            }
            summary
        });

        CollectorHandle { task }
    }

    /// Runs one network response through the collection steps.
    pub async fn handle_response(&self, response: NetworkResponse) -> Outcome {
        if !response.kind.carries_script() {
            return Outcome::Ignored;
        }

        let url = response.url.clone();
        if !self.include_cross_origin && domain_of(&url) != self.domain {
            debug!("Ignoring cross-origin response: {url}");
            return Outcome::CrossOrigin;
        }

        if !self.policy.is_interesting(url.as_str()) {
            debug!("Ignoring uninteresting URL: {url}");
            return Outcome::Uninteresting;
        }

        let bytes = match response.body().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("❌ Error downloading {url}: {}", e.message);
                self.ledger
                    .record_error(format!("Download error: {url}"), &e.message);
                return Outcome::Unreadable;
            }
        };

        self.admit(AssetRecord::new(AssetSource::External(url), bytes))
            .await
    }

    /// Runs a page's inline scripts through the collection steps, in order.
    pub async fn process_inline_scripts(&self, scripts: &[String]) -> InlineSummary {
        let mut summary = InlineSummary {
            found: scripts.len(),
            saved: 0,
        };
        let source = AssetSource::Inline {
            domain: self.domain.clone(),
        };

        for script in scripts {
            if !self.policy.is_interesting(script) {
                debug!("⚠️ Skipping uninteresting inline script");
                self.ledger
                    .record_skip(SkipReason::Uninteresting, &source.label());
                continue;
            }
            let record = AssetRecord::new(source.clone(), script.as_bytes().to_vec());
            if let Outcome::Saved(_) = self.admit(record).await {
                summary.saved += 1;
            }
        }
        summary
    }

    /// Size floor, claim and persist, shared by both candidate kinds.
    async fn admit(&self, record: AssetRecord) -> Outcome {
        let label = record.source.label();

        if record.bytes.len() < self.min_size {
            debug!("⚠️ Skipping small file: {label}");
            self.ledger.record_skip(SkipReason::TooSmall, &label);
            return Outcome::TooSmall;
        }

        if !self.ledger.try_claim(&record.fingerprint) {
            debug!("⚠️ Skipping duplicate file: {label}");
            self.ledger.record_skip(SkipReason::Duplicate, &label);
            return Outcome::Duplicate;
        }

        let filename = record.filename();
        match self.output.persist(&filename, &record.bytes).await {
            Ok(path) => {
                debug!("💾 Saved: {filename} ({label})");
                self.ledger.record_saved(&filename, &label);
                Outcome::Saved(path)
            }
            Err(e) => {
                error!("❌ {e}");
                self.ledger
                    .record_error(format!("Persist error: {label}"), e.to_string());
                Outcome::PersistFailed
            }
        }
    }
}

/// Background handling of one page's responses.
pub struct CollectorHandle {
    task: JoinHandle<CollectorSummary>,
}

impl CollectorHandle {
    /// Waits until the page's channel has closed and every response is handled.
    pub async fn finish(self) -> CollectorSummary {
        match self.task.await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Collector task failed: {e}");
                CollectorSummary::default()
            }
        }
    }
}
