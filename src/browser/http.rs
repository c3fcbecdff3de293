//! HTTP-backed browsing capability.
//!
//! Navigation fetches the document; every `<script src>` it references is
//! then reported as a `Script` response whose body is fetched when a
//! subscriber asks for it. Nothing is executed, so scripts injected at
//! runtime and fetch/XHR traffic are not observed.

use std::collections::HashSet;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use url::Url;

use super::{markup, Browser, NetworkResponse, Page, ResourceKind};
use crate::config::Config;
use crate::error_handling::{
    categorize_navigation_error, error_chain_text, BodyReadError, BrowserError,
    InitializationError, NavigationError,
};
use crate::initialization::init_client;

/// Browser that speaks plain HTTP through a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpBrowser {
    client: reqwest::Client,
    script_timeout: Duration,
}

impl HttpBrowser {
    /// Builds the HTTP client. Failure here is fatal to the session.
    pub fn launch(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::with_client(client, config.timeout))
    }

    /// Wraps an existing client. Script bodies are fetched with `script_timeout`.
    pub fn with_client(client: reqwest::Client, script_timeout: Duration) -> Self {
        Self {
            client,
            script_timeout,
        }
    }
}

impl Browser for HttpBrowser {
    type Page = HttpPage;

    async fn open_page(&self) -> Result<HttpPage, BrowserError> {
        Ok(HttpPage {
            client: self.client.clone(),
            script_timeout: self.script_timeout,
            subscriber: None,
            document: None,
        })
    }

    async fn close(self) {
        debug!("HTTP browser released");
    }
}

/// One page context of an `HttpBrowser`.
pub struct HttpPage {
    client: reqwest::Client,
    script_timeout: Duration,
    subscriber: Option<UnboundedSender<NetworkResponse>>,
    document: Option<String>,
}

impl HttpPage {
    fn emit(&self, response: NetworkResponse) {
        if let Some(tx) = &self.subscriber {
            // A dropped receiver just means nobody is listening any more
            let _ = tx.send(response);
        }
    }
}

impl Page for HttpPage {
    fn subscribe(&mut self) -> UnboundedReceiver<NetworkResponse> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriber = Some(tx);
        rx
    }

    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<(), NavigationError> {
        let response = with_timeout(self.client.get(url.clone()), timeout)
            .send()
            .await
            .map_err(|e| categorize_navigation_error(url.as_str(), timeout, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavigationError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| categorize_navigation_error(url.as_str(), timeout, &e))?;

        self.emit(NetworkResponse::ready(
            final_url.clone(),
            ResourceKind::Document,
            body.clone().into_bytes(),
        ));

        let mut requested = HashSet::new();
        for src in markup::extract_script_sources(&body) {
            let Ok(script_url) = final_url.join(&src) else {
                debug!("Ignoring unresolvable script src '{}' on {}", src, final_url);
                continue;
            };
            if !matches!(script_url.scheme(), "http" | "https") {
                continue;
            }
            if !requested.insert(script_url.clone()) {
                continue;
            }
            let body = fetch_body(self.client.clone(), script_url.clone(), self.script_timeout);
            self.emit(NetworkResponse::new(script_url, ResourceKind::Script, body));
        }

        self.document = Some(body);
        Ok(())
    }

    async fn current_markup(&self) -> Result<String, BrowserError> {
        self.document.clone().ok_or(BrowserError::NoDocument)
    }

    async fn close(self) {}
}

fn with_timeout(request: reqwest::RequestBuilder, timeout: Duration) -> reqwest::RequestBuilder {
    if timeout.is_zero() {
        request
    } else {
        request.timeout(timeout)
    }
}

async fn fetch_body(
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
) -> Result<Vec<u8>, BodyReadError> {
    let body_error = |message: String| BodyReadError {
        url: url.to_string(),
        message,
    };

    let response = with_timeout(client.get(url.clone()), timeout)
        .send()
        .await
        .map_err(|e| body_error(error_chain_text(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(body_error(format!("HTTP {}", status.as_u16())));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| body_error(error_chain_text(&e)))?;
    Ok(bytes.to_vec())
}
