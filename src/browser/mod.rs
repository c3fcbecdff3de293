//! Browsing capability consumed by the collector and the crawl.
//!
//! The engine that renders pages is an external collaborator. The core needs
//! only what `Browser` and `Page` expose: open and close page contexts,
//! navigate with a timeout, subscribe to network responses, read the current
//! markup, and list link targets.
//!
//! `HttpBrowser` is the bundled implementation: plain HTTP fetches of the
//! document and its `<script src>` resources, no script execution.

mod http;
pub mod markup;

pub use http::{HttpBrowser, HttpPage};

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::mpsc::UnboundedReceiver;
use url::Url;

use crate::error_handling::{BodyReadError, BrowserError, NavigationError};

/// Resource type of a network response, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Document,
    Script,
    Fetch,
    Xhr,
    Stylesheet,
    Image,
    Font,
    Other,
}

impl ResourceKind {
    /// Script, fetch and XHR payloads are the only candidates for collection.
    pub fn carries_script(&self) -> bool {
        matches!(
            self,
            ResourceKind::Script | ResourceKind::Fetch | ResourceKind::Xhr
        )
    }
}

/// Future resolving to a response body.
pub type BodyFuture = BoxFuture<'static, Result<Vec<u8>, BodyReadError>>;

/// A completed network response delivered to page subscribers.
///
/// The body is retrieved lazily; awaiting it may fail.
pub struct NetworkResponse {
    pub url: Url,
    pub kind: ResourceKind,
    body: BodyFuture,
}

impl NetworkResponse {
    pub fn new<F>(url: Url, kind: ResourceKind, body: F) -> Self
    where
        F: Future<Output = Result<Vec<u8>, BodyReadError>> + Send + 'static,
    {
        Self {
            url,
            kind,
            body: body.boxed(),
        }
    }

    /// A response whose body is already in memory.
    pub fn ready(url: Url, kind: ResourceKind, bytes: Vec<u8>) -> Self {
        Self::new(url, kind, futures::future::ready(Ok(bytes)))
    }

    /// A response whose body cannot be read.
    pub fn unreadable(url: Url, kind: ResourceKind, message: impl Into<String>) -> Self {
        let error = BodyReadError {
            url: url.to_string(),
            message: message.into(),
        };
        Self::new(url, kind, futures::future::ready(Err(error)))
    }

    /// Retrieves the body.
    pub async fn body(self) -> Result<Vec<u8>, BodyReadError> {
        self.body.await
    }
}

impl fmt::Debug for NetworkResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkResponse")
            .field("url", &self.url.as_str())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// An acquired browsing engine.
#[allow(async_fn_in_trait)]
pub trait Browser: Sized {
    type Page: Page;

    /// Opens a fresh page-equivalent context.
    async fn open_page(&self) -> Result<Self::Page, BrowserError>;

    /// Releases the engine.
    async fn close(self);
}

/// One page-equivalent context.
#[allow(async_fn_in_trait)]
pub trait Page: Sized {
    /// Subscribes to the page's network responses.
    ///
    /// Responses completed after this call are delivered on the returned
    /// channel; it closes when the page closes. A new subscription replaces
    /// the previous one.
    fn subscribe(&mut self) -> UnboundedReceiver<NetworkResponse>;

    /// Navigates to `url`, failing if the document does not load in `timeout`.
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<(), NavigationError>;

    /// Serialized DOM of the current document.
    async fn current_markup(&self) -> Result<String, BrowserError>;

    /// Raw `href` values of the current document's links, possibly relative.
    async fn query_links(&self) -> Result<Vec<String>, BrowserError> {
        let markup = self.current_markup().await?;
        Ok(markup::extract_hrefs(&markup))
    }

    /// Releases the page. Its response channel closes.
    async fn close(self);
}
