//! Error type definitions.
//!
//! Per-asset and per-page failures (`NavigationError`, `BodyReadError`,
//! `PersistError`) are recorded in the collection ledger and never abort a
//! session. `InvalidUrl`, `BrowserError` and `SessionError` surface to the
//! caller.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A page navigation failed.
///
/// Variants follow what an operator can act on: raise the timeout, fix the
/// URL, or accept that the site refuses scraping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No response within the navigation timeout.
    #[error("navigation to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u128 },

    /// The server actively refused the connection.
    #[error("connection refused by {url}")]
    ConnectionRefused { url: String },

    /// TLS handshake or certificate failure.
    #[error("TLS error for {url}: {message}")]
    Tls { url: String, message: String },

    /// Host name could not be resolved.
    #[error("DNS resolution failed for {url}: {message}")]
    Dns { url: String, message: String },

    /// The document responded with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Anything else the browsing engine reported.
    #[error("navigation to {url} failed: {message}")]
    Other { url: String, message: String },
}

/// A response body could not be retrieved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to read body of {url}: {message}")]
pub struct BodyReadError {
    pub url: String,
    pub message: String,
}

/// An asset could not be written to the output directory.
#[derive(Error, Debug)]
#[error("failed to write {}: {source}", path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A target URL failed validation before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid URL '{url}': {reason}")]
pub struct InvalidUrl {
    pub url: String,
    pub reason: String,
}

/// Failures of the browsing capability itself.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// A page-equivalent context could not be opened.
    ///
    /// Engines with a bounded pool of tabs or contexts report this; the
    /// HTTP browser opens pages without limit and never does.
    #[error("failed to open page: {0}")]
    OpenPage(String),

    /// The current page has no document to inspect.
    #[error("no document loaded on page")]
    NoDocument,
}

/// Fatal session failures.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The target URL is unusable.
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),

    /// The output directory could not be prepared.
    #[error("failed to prepare output directory {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browsing capability failed.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The HTTP client behind the bundled browser could not be built.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}
