//! CSS selector parsing utilities.

use scraper::Selector;

/// Selector that matches no element.
const MATCH_NOTHING: &str = "*:not(*)";

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches
/// nothing, so markup extraction degrades to "found nothing" instead of
/// panicking.
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse(MATCH_NOTHING).unwrap_or_else(|_| {
            unreachable!("fallback selector '{MATCH_NOTHING}' always parses")
        })
    })
}
