//! Application helpers.
//!
//! Target URL validation, URL-file loading, and banner/summary printing used
//! by the session layer and the binary.

pub mod input;
pub mod statistics;
pub mod url;

pub use input::load_targets;
pub use statistics::{print_batch_summary, print_start_banner};
pub use self::url::validate_and_normalize_url;
