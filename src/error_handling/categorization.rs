//! Navigation error categorization.
//!
//! Maps `reqwest` failures onto `NavigationError` variants and turns them into
//! operator-facing messages.

use std::error::Error as StdError;
use std::time::Duration;

use super::types::NavigationError;

/// Categorizes a `reqwest::Error` raised while navigating to `url`.
///
/// HTTP status is checked first, then the reqwest error kind, then the text
/// of the source chain (hyper and rustls do not expose typed DNS or TLS
/// errors through reqwest).
pub fn categorize_navigation_error(
    url: &str,
    timeout: Duration,
    error: &reqwest::Error,
) -> NavigationError {
    if let Some(status) = error.status() {
        return NavigationError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        };
    }

    if error.is_timeout() {
        return NavigationError::Timeout {
            url: url.to_string(),
            timeout_ms: timeout.as_millis(),
        };
    }

    let chain = error_chain_text(error);
    categorize_message(url, &chain)
}

/// Categorizes a free-form failure message from a browsing engine.
pub fn categorize_message(url: &str, message: &str) -> NavigationError {
    let lower = message.to_lowercase();
    let url = url.to_string();
    let message = message.to_string();

    if lower.contains("refused") {
        NavigationError::ConnectionRefused { url }
    } else if lower.contains("dns")
        || lower.contains("failed to lookup")
        || lower.contains("name or service not known")
        || lower.contains("no such host")
    {
        NavigationError::Dns { url, message }
    } else if lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl") {
        NavigationError::Tls { url, message }
    } else if lower.contains("timed out") || lower.contains("timeout") {
        NavigationError::Timeout {
            url,
            timeout_ms: 0,
        }
    } else {
        NavigationError::Other { url, message }
    }
}

/// Joins an error and all its sources into one `a: b: c` string.
pub fn error_chain_text(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

impl NavigationError {
    /// The URL whose navigation failed.
    pub fn url(&self) -> &str {
        match self {
            NavigationError::Timeout { url, .. }
            | NavigationError::ConnectionRefused { url }
            | NavigationError::Tls { url, .. }
            | NavigationError::Dns { url, .. }
            | NavigationError::HttpStatus { url, .. }
            | NavigationError::Other { url, .. } => url,
        }
    }

    /// A message an operator can act on.
    pub fn user_message(&self) -> String {
        let url = self.url();
        match self {
            NavigationError::Timeout { .. } => format!(
                "Timeout error: the website at {url} took too long to respond. Try increasing the timeout with -t."
            ),
            NavigationError::ConnectionRefused { .. } => {
                format!("Connection refused: the server at {url} actively refused the connection.")
            }
            NavigationError::Tls { .. } => format!(
                "SSL/TLS error: could not establish a secure connection to {url}. The certificate may be invalid."
            ),
            NavigationError::Dns { .. } => {
                format!("DNS resolution error: could not resolve the host in {url}. Check the URL.")
            }
            NavigationError::HttpStatus { status: 401, .. } => {
                format!("Authentication required (HTTP 401): the server at {url} requires authentication.")
            }
            NavigationError::HttpStatus { status: 403, .. } => format!(
                "Access forbidden (HTTP 403): the server at {url} denied access. The site may block scraping."
            ),
            NavigationError::HttpStatus { status: 404, .. } => {
                format!("Page not found (HTTP 404): {url} was not found on the server.")
            }
            NavigationError::HttpStatus { status, .. } => {
                format!("HTTP {status}: the server at {url} returned an error status.")
            }
            NavigationError::Other { message, .. } => {
                format!("Error processing {url}: {message}")
            }
        }
    }
}
