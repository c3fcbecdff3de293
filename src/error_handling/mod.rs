//! Error handling.
//!
//! This module provides:
//! - Error type definitions (`thiserror`)
//! - Navigation error categorization and operator-facing messages

mod categorization;
mod types;

pub use categorization::{categorize_message, categorize_navigation_error, error_chain_text};
pub use types::{
    BodyReadError, BrowserError, InitializationError, InvalidUrl, NavigationError, PersistError,
    SessionError,
};
