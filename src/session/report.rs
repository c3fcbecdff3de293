//! Session settings and end-of-run report.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;
use url::Url;

use crate::collector::InlineSummary;
use crate::config::Config;
use crate::filter::FilterMode;
use crate::ledger::{LedgerSnapshot, RecordedError, SkipReason};

const BLOCK_WIDTH: usize = 70;

/// Renders `body` between two horizontal rules.
pub fn info_block(body: &str) -> String {
    let border = "═".repeat(BLOCK_WIDTH);
    format!("{border}\n{}\n{border}", body.trim_end())
}

/// The options a session ran with, as shown in the banner and the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub output_root: PathBuf,
    pub timeout: Duration,
    pub delay: Duration,
    pub filter_mode: FilterMode,
    pub min_size: usize,
    pub crawl: bool,
    pub max_depth: u32,
    pub include_cross_origin: bool,
    pub clear_output: bool,
}

impl From<&Config> for RunSettings {
    fn from(config: &Config) -> Self {
        Self {
            output_root: config.output_root.clone(),
            timeout: config.timeout,
            delay: config.delay,
            filter_mode: config.filter_mode,
            min_size: config.min_size,
            crawl: config.crawl,
            max_depth: config.max_depth,
            include_cross_origin: config.include_cross_origin,
            clear_output: config.clear_output,
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

impl fmt::Display for RunSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Output Directory:   {}", self.output_root.display())?;
        writeln!(f, "Timeout:            {:.1}s", self.timeout.as_secs_f64())?;
        writeln!(f, "Delay:              {}s", self.delay.as_secs_f64())?;
        writeln!(f, "Filter Mode:        {}", self.filter_mode)?;
        writeln!(f, "Min File Size:      {} bytes", self.min_size)?;
        writeln!(f, "Crawl:              {}", enabled(self.crawl))?;
        writeln!(f, "Max Depth:          {}", self.max_depth)?;
        writeln!(f, "Cross-Origin:       {}", enabled(self.include_cross_origin))?;
        write!(f, "Clear Output Dir:   {}", enabled(self.clear_output))
    }
}

/// Everything a finished session has to say.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub target: Url,
    pub output_dir: PathBuf,
    pub settings: RunSettings,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Files persisted
    pub saved: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub inline: InlineSummary,
    /// Pages visited by the crawl, if it ran
    pub pages_crawled: Option<usize>,
    pub errors: Vec<RecordedError>,
}

impl SessionReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        target: Url,
        output_dir: PathBuf,
        settings: RunSettings,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        inline: InlineSummary,
        pages_crawled: Option<usize>,
        snapshot: LedgerSnapshot,
    ) -> Self {
        Self {
            target,
            output_dir,
            settings,
            started_at,
            elapsed,
            saved: snapshot.saved,
            skipped: snapshot.skipped,
            inline,
            pages_crawled,
            errors: snapshot.errors,
        }
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    /// `3 uninteresting, 1 small, 0 duplicate`
    fn skip_line(&self) -> String {
        let mut reasons: Vec<SkipReason> = SkipReason::iter().collect();
        reasons.sort_by_key(|reason| match reason {
            SkipReason::Uninteresting => 0,
            SkipReason::TooSmall => 1,
            SkipReason::Duplicate => 2,
        });
        reasons
            .iter()
            .map(|reason| format!("{} {}", self.skip_count(*reason), reason))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut body = String::new();
        body.push_str("🎉 Download Complete!\n");
        body.push_str(&format!("Target URL:         {}\n", self.target));
        body.push_str(&format!("{}\n", self.settings));
        if let Some(pages) = self.pages_crawled {
            body.push_str(&format!("Pages crawled:      {pages}\n"));
        }
        body.push_str(&format!(
            "Inline scripts:     {} found, {} saved\n",
            self.inline.found, self.inline.saved
        ));
        body.push_str(&format!("Total JS files downloaded: {}\n", self.saved));
        body.push_str(&format!("Skipped: {} scripts\n", self.skip_line()));
        body.push_str(&format!(
            "Elapsed time: {:.2} seconds",
            self.elapsed.as_secs_f64()
        ));
        write!(f, "{}", info_block(&body))?;

        if !self.errors.is_empty() {
            let mut errors = format!("⚠️ Total errors: {}", self.errors.len());
            for error in &self.errors {
                errors.push('\n');
                errors.push_str(&error.to_string());
            }
            write!(f, "\n{}", info_block(&errors))?;
        }
        Ok(())
    }
}
