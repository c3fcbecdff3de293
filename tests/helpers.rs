// Shared test helpers: an in-memory browser over a scripted site.
//
// Pages are registered by URL with their markup and the network responses
// their navigation produces. Navigations, opened and closed pages are
// recorded so tests can assert on crawl behavior.

#![allow(dead_code)] // Each test binary uses a different subset

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use url::Url;

use jsharvest::browser::{Browser, NetworkResponse, Page, ResourceKind};
use jsharvest::error_handling::{BrowserError, NavigationError};
use jsharvest::Config;

#[derive(Clone)]
struct ScriptedResponse {
    url: Url,
    kind: ResourceKind,
    body: Result<Vec<u8>, String>,
}

#[derive(Clone, Default)]
struct PageSpec {
    markup: String,
    responses: Vec<ScriptedResponse>,
    failure: Option<NavigationError>,
}

#[derive(Default)]
struct SiteState {
    pages: HashMap<String, PageSpec>,
    navigations: Vec<String>,
    opened: usize,
    closed: usize,
    page_limit: Option<usize>,
    browser_closed: bool,
}

/// A scripted site shared by a `FakeBrowser` and the test that inspects it.
#[derive(Clone, Default)]
pub struct FakeSite {
    state: Arc<Mutex<SiteState>>,
}

fn key(url: &str) -> String {
    Url::parse(url).expect("valid test URL").to_string()
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page with its markup.
    pub fn page(&self, url: &str, markup: &str) -> &Self {
        let mut state = self.state.lock().expect("site lock");
        state.pages.entry(key(url)).or_default().markup = markup.to_string();
        self
    }

    /// Registers a page whose markup is only links to `targets`.
    pub fn linked_page(&self, url: &str, targets: &[&str]) -> &Self {
        let anchors: String = targets
            .iter()
            .map(|t| format!("<a href=\"{t}\">{t}</a>"))
            .collect();
        self.page(url, &format!("<html><body>{anchors}</body></html>"))
    }

    /// Adds a response that navigating to `page_url` produces.
    pub fn response(&self, page_url: &str, url: &str, kind: ResourceKind, body: &[u8]) -> &Self {
        self.push_response(page_url, url, kind, Ok(body.to_vec()))
    }

    /// Adds a `Script` response to `page_url`.
    pub fn script(&self, page_url: &str, url: &str, body: &[u8]) -> &Self {
        self.response(page_url, url, ResourceKind::Script, body)
    }

    /// Adds a response whose body cannot be read.
    pub fn broken_script(&self, page_url: &str, url: &str, message: &str) -> &Self {
        self.push_response(page_url, url, ResourceKind::Script, Err(message.to_string()))
    }

    /// Makes navigation to `url` fail with `error`.
    pub fn fail_navigation(&self, url: &str, error: NavigationError) -> &Self {
        let mut state = self.state.lock().expect("site lock");
        state.pages.entry(key(url)).or_default().failure = Some(error);
        self
    }

    fn push_response(
        &self,
        page_url: &str,
        url: &str,
        kind: ResourceKind,
        body: Result<Vec<u8>, String>,
    ) -> &Self {
        let mut state = self.state.lock().expect("site lock");
        state
            .pages
            .entry(key(page_url))
            .or_default()
            .responses
            .push(ScriptedResponse {
                url: Url::parse(url).expect("valid test URL"),
                kind,
                body,
            });
        self
    }

    /// Makes `open_page` fail once `limit` pages have been opened.
    pub fn page_limit(&self, limit: usize) -> &Self {
        self.state.lock().expect("site lock").page_limit = Some(limit);
        self
    }

    pub fn browser(&self) -> FakeBrowser {
        FakeBrowser { site: self.clone() }
    }

    /// URLs navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().expect("site lock").navigations.clone()
    }

    pub fn pages_opened(&self) -> usize {
        self.state.lock().expect("site lock").opened
    }

    pub fn pages_still_open(&self) -> usize {
        let state = self.state.lock().expect("site lock");
        state.opened - state.closed
    }

    pub fn browser_closed(&self) -> bool {
        self.state.lock().expect("site lock").browser_closed
    }
}

pub struct FakeBrowser {
    site: FakeSite,
}

impl Browser for FakeBrowser {
    type Page = FakePage;

    async fn open_page(&self) -> Result<FakePage, BrowserError> {
        {
            let mut state = self.site.state.lock().expect("site lock");
            if state.page_limit.is_some_and(|limit| state.opened >= limit) {
                return Err(BrowserError::OpenPage("page limit reached".to_string()));
            }
            state.opened += 1;
        }
        Ok(FakePage {
            site: self.site.clone(),
            subscriber: None,
            markup: None,
        })
    }

    async fn close(self) {
        self.site.state.lock().expect("site lock").browser_closed = true;
    }
}

pub struct FakePage {
    site: FakeSite,
    subscriber: Option<UnboundedSender<NetworkResponse>>,
    markup: Option<String>,
}

impl Page for FakePage {
    fn subscribe(&mut self) -> UnboundedReceiver<NetworkResponse> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriber = Some(tx);
        rx
    }

    async fn navigate(&mut self, url: &Url, _timeout: Duration) -> Result<(), NavigationError> {
        let entry = {
            let mut state = self.site.state.lock().expect("site lock");
            state.navigations.push(url.to_string());
            state.pages.get(url.as_str()).cloned()
        };
        let Some(entry) = entry else {
            return Err(NavigationError::HttpStatus {
                url: url.to_string(),
                status: 404,
            });
        };

        if let Some(tx) = &self.subscriber {
            for scripted in entry.responses {
                let response = match scripted.body {
                    Ok(bytes) => NetworkResponse::ready(scripted.url, scripted.kind, bytes),
                    Err(message) => NetworkResponse::unreadable(scripted.url, scripted.kind, message),
                };
                let _ = tx.send(response);
            }
        }

        if let Some(failure) = entry.failure {
            return Err(failure);
        }
        self.markup = Some(entry.markup);
        Ok(())
    }

    async fn current_markup(&self) -> Result<String, BrowserError> {
        self.markup.clone().ok_or(BrowserError::NoDocument)
    }

    async fn close(self) {
        self.site.state.lock().expect("site lock").closed += 1;
    }
}

/// Default config without any waiting.
pub fn quick_config() -> Config {
    Config {
        settle: Duration::ZERO,
        delay: Duration::ZERO,
        ..Config::default()
    }
}

/// A script body of `len` bytes that no filter rule matches.
pub fn script_body(seed: &str, len: usize) -> Vec<u8> {
    let mut body = format!("function {seed}() {{ return 1; }}\n").into_bytes();
    while body.len() < len {
        body.extend_from_slice(b"// padding\n");
    }
    body.truncate(len);
    body
}

/// Names of the files in `dir`, sorted.
pub fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}
