//! Markup inspection helpers used by page implementations and the session.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::utils::parse_selector_with_fallback;

const INLINE_SCRIPT_SELECTOR_STR: &str = "script:not([src])";
const SCRIPT_SRC_SELECTOR_STR: &str = "script[src]";
const LINK_SELECTOR_STR: &str = "a[href]";

static INLINE_SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(INLINE_SCRIPT_SELECTOR_STR, "inline scripts"));

static SCRIPT_SRC_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(SCRIPT_SRC_SELECTOR_STR, "script sources"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(LINK_SELECTOR_STR, "link discovery"));

/// Bodies of the `<script>` elements without `src` in `markup`, in
/// document order.
///
/// Empty and whitespace-only scripts are dropped, as are data blocks whose
/// `type` is not JavaScript (JSON-LD, templates, import maps).
pub fn extract_inline_scripts(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    document
        .select(&INLINE_SCRIPT_SELECTOR)
        .filter(|element| is_javascript_type(element.value().attr("type")))
        .map(|element| element.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Raw `src` attributes of `<script src>` elements, in document order.
pub fn extract_script_sources(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    document
        .select(&SCRIPT_SRC_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw `href` attributes of `<a href>` elements, in document order.
pub fn extract_hrefs(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_javascript_type(script_type: Option<&str>) -> bool {
    match script_type.map(|t| t.trim().to_ascii_lowercase()) {
        None => true,
        Some(t) => t.is_empty() || t == "module" || t.contains("javascript") || t.contains("ecmascript"),
    }
}
