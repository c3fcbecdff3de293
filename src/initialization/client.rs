//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Maximum redirect hops followed for page and script requests.
const MAX_REDIRECT_HOPS: usize = 10;

/// Initializes the HTTP client used by the HTTP-backed browser.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Connect timeout bounded by the navigation timeout
/// - Redirect following (up to 10 hops)
/// - Rustls TLS backend
///
/// Per-request timeouts are applied by the caller, because navigation and
/// script fetches share the client but not the deadline.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS));
    if !config.timeout.is_zero() {
        builder = builder.connect_timeout(config.timeout.min(Duration::from_secs(30)));
    }
    builder.build()
}
