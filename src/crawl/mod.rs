//! Same-domain link crawl.
//!
//! Depth-first over an explicit worklist of `(url, remaining_depth)` pairs,
//! guarded by a `VisitedSet` of normalized URLs. Every visited page gets its
//! own page context and collector; links are followed only while depth
//! remains. A failed navigation ends that branch and nothing else.

mod links;

pub use links::discover_links;

use std::collections::HashSet;

use log::{info, warn};
use url::Url;

use crate::browser::{Browser, Page};
use crate::collector::AssetCollector;
use crate::config::Config;
use crate::identity::normalize_url;

/// Normalized URLs already traversed. Owned by one crawl.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` visited. Returns false if it already was.
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(normalize_url(url))
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(&normalize_url(url))
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// What one crawl did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages in visiting order
    pub pages: Vec<Url>,
    /// Pages whose navigation failed
    pub failed: usize,
    /// Network responses delivered across all pages
    pub responses: usize,
}

/// Crawls from `start`, following links up to `config.max_depth` hops.
///
/// Pages are visited depth-first in document order of their links. Each
/// page is closed, and its collector drained, before the next one opens.
pub async fn crawl<B: Browser>(
    browser: &B,
    start: &Url,
    collector: &AssetCollector,
    config: &Config,
) -> CrawlStats {
    let mut visited = VisitedSet::new();
    let mut worklist = vec![(start.clone(), config.max_depth)];
    let mut stats = CrawlStats::default();

    while let Some((url, remaining_depth)) = worklist.pop() {
        if !visited.insert(&url) {
            continue;
        }
        stats.pages.push(url.clone());

        let expand = remaining_depth > 0;
        let Some(visit) = visit_page(browser, &url, expand, collector, config).await else {
            stats.failed += 1;
            continue;
        };
        stats.responses += visit.responses;

        if expand {
            let next = discover_links(&url, &visit.hrefs, collector.domain(), &visited);
            // Reversed so the first link in the document is popped first
            for link in next.into_iter().rev() {
                worklist.push((link, remaining_depth - 1));
            }
        }
    }

    info!(
        "🕸 Crawl finished: {} page(s) visited, {} failed",
        stats.pages.len(),
        stats.failed
    );
    stats
}

struct PageVisit {
    hrefs: Vec<String>,
    responses: usize,
}

/// Opens a page, collects from it, and returns its raw links if `expand`.
///
/// Returns `None` if the page could not be opened or navigated; the failure
/// is recorded in the ledger.
async fn visit_page<B: Browser>(
    browser: &B,
    url: &Url,
    expand: bool,
    collector: &AssetCollector,
    config: &Config,
) -> Option<PageVisit> {
    let ledger = collector.ledger();
    let context = format!("Crawl error: {url}");

    let mut page = match browser.open_page().await {
        Ok(page) => page,
        Err(e) => {
            warn!("⚠️ Failed to crawl {url}: {e}");
            ledger.record_error(context, e.to_string());
            return None;
        }
    };
    let handle = collector.attach(&mut page);

    info!("🔗 Crawling: {url}");
    let navigated = page.navigate(url, config.timeout).await;

    let hrefs = match navigated {
        Ok(()) => {
            if !config.delay.is_zero() {
                tokio::time::sleep(config.delay).await;
            }
            if expand {
                page.query_links().await.unwrap_or_else(|e| {
                    warn!("⚠️ Failed to read links of {url}: {e}");
                    ledger.record_error(context.clone(), e.to_string());
                    Vec::new()
                })
            } else {
                Vec::new()
            }
        }
        Err(e) => {
            warn!("⚠️ Failed to crawl {url}: {}", e.user_message());
            ledger.record_error(context, e.to_string());
            page.close().await;
            handle.finish().await;
            return None;
        }
    };

    page.close().await;
    let summary = handle.finish().await;
    Some(PageVisit {
        hrefs,
        responses: summary.responses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visited_set_uses_normalized_identity() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());

        let url = Url::parse("https://www.Example.com/about/?ref=nav").expect("valid URL");
        assert!(visited.insert(&url));
        assert!(!visited.insert(&Url::parse("https://example.com/about").expect("valid URL")));
        assert!(visited.contains(&Url::parse("https://example.com/about#team").expect("valid URL")));
        assert!(!visited.contains(&Url::parse("http://example.com/about").expect("valid URL")));
        assert_eq!(visited.len(), 1);
    }
}
