//! Link discovery for the crawl.

use std::collections::HashSet;

use url::Url;

use super::VisitedSet;
use crate::identity::{domain_of, normalize_url};

/// Path extensions that never lead to an HTML page.
const NON_HTML_EXTENSIONS: &[&str] = &[
    "7z", "apk", "avi", "bmp", "css", "csv", "dmg", "doc", "docx", "eot", "exe", "gif", "gz",
    "ico", "jpeg", "jpg", "js", "json", "mjs", "mov", "mp3", "mp4", "otf", "pdf", "png", "ppt",
    "pptx", "rar", "svg", "tar", "tgz", "ttf", "txt", "wav", "webm", "webp", "woff", "woff2",
    "xls", "xlsx", "xml", "zip",
];

/// Resolves raw `hrefs` against `base` and keeps the ones worth crawling.
///
/// A link survives if it is http(s), its host is `domain`, it does not point
/// at an obviously non-HTML resource, and its normalized form is neither in
/// `visited` nor already returned. Document order is preserved.
pub fn discover_links(base: &Url, hrefs: &[String], domain: &str, visited: &VisitedSet) -> Vec<Url> {
    let mut seen = HashSet::new();
    hrefs
        .iter()
        .filter_map(|href| base.join(href).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .filter(|url| domain_of(url) == domain)
        .filter(|url| !has_non_html_extension(url))
        .filter(|url| !visited.contains(url))
        .filter(|url| seen.insert(normalize_url(url)))
        .collect()
}

fn has_non_html_extension(url: &Url) -> bool {
    let last_segment = url.path().rsplit('/').next().unwrap_or_default();
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            NON_HTML_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}
