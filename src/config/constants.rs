//! Configuration constants.
//!
//! Defaults for the CLI and the library `Config`, plus fixed limits used by
//! naming and logging.

use std::time::Duration;

/// Default output root directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "jsharvest_output";

/// Default navigation timeout per page in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 60.0;

/// Default delay between crawl requests in seconds.
pub const DEFAULT_DELAY_SECS: f64 = 0.5;

/// Default settle wait after the root page navigation, in seconds.
///
/// Late-loading scripts (analytics beacons, lazy chunks) keep arriving after
/// the load event; the root page gets this long to deliver them.
pub const DEFAULT_SETTLE_SECS: f64 = 10.0;

/// Default minimum asset size in bytes. Smaller assets are skipped as `too small`.
pub const DEFAULT_MIN_SIZE: usize = 150;

/// Default maximum crawl depth.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default User-Agent string for page and script requests.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Upper bound for a generated asset filename, in bytes.
///
/// 255 is the per-component limit on ext4, NTFS, APFS and friends.
pub const MAX_FILENAME_LEN: usize = 255;

/// Number of fingerprint hex characters embedded in generated filenames.
pub const FINGERPRINT_PREFIX_LEN: usize = 8;

/// Maximum URL length accepted as a target.
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum length of an error message kept in the ledger.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

/// Name of the verbose decision log written into the output directory.
pub const VERBOSE_LOG_FILE: &str = "verbose.log";

/// Converts a seconds value from the CLI into a `Duration`, clamping
/// negative and non-finite input to zero and values too large for a
/// `Duration` to `Duration::MAX`.
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Parses a seconds argument, rejecting values no `Duration` can hold.
pub fn parse_seconds(value: &str) -> Result<f64, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid number of seconds '{value}': {e}"))?;
    if secs.is_finite() && secs > 0.0 && Duration::try_from_secs_f64(secs).is_err() {
        return Err(format!("{value} seconds is too large"));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_duration() {
        assert_eq!(secs_to_duration(1.5), Duration::from_millis(1500));
        assert_eq!(secs_to_duration(0.0), Duration::ZERO);
        assert_eq!(secs_to_duration(-3.0), Duration::ZERO);
        assert_eq!(secs_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(secs_to_duration(1e30), Duration::MAX);
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("2.5"), Ok(2.5));
        assert_eq!(parse_seconds("-3"), Ok(-3.0));
        assert!(parse_seconds("soon").is_err());
        assert!(parse_seconds("1e30").is_err());
    }
}
