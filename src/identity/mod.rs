//! URL and content identity.
//!
//! Key functions:
//! - `normalize_url()` - revisit key for the crawl (`VisitedSet` membership)
//! - `domain_of()` - host used for same-origin checks and output partitioning
//! - `content_fingerprint()` - content key for ledger dedup
//! - `build_filename()` / `build_inline_filename()` - deterministic asset names

mod naming;

pub use naming::{
    build_filename, build_inline_filename, content_fingerprint, fingerprint_prefix,
    sanitize_filename_part,
};

use url::Url;

/// Normalizes a URL into its crawl identity.
///
/// Lowercases scheme and host, strips a single leading `www.` label, strips
/// trailing slashes from the path, and drops query and fragment. Default
/// ports are already elided by `url`; other ports are kept, since they name
/// a different server.
///
/// Two URLs normalize equal iff they are the same crawl target.
pub fn normalize_url(url: &Url) -> String {
    let scheme = url.scheme().to_ascii_lowercase();
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let path = url.path().trim_end_matches('/');

    match url.port() {
        Some(port) => format!("{scheme}://{host}:{port}{path}"),
        None => format!("{scheme}://{host}{path}"),
    }
}

/// Returns the lower-cased host of `url`, or an empty string if it has none.
pub fn domain_of(url: &Url) -> String {
    url.host_str().unwrap_or_default().to_ascii_lowercase()
}
