//! Small shared helpers.
//!
//! - Error message sanitization
//! - CSS selector parsing with fallback

pub mod sanitize;
mod selector;

pub use selector::parse_selector_with_fallback;
