//! Target URL validation.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::InvalidUrl;

/// Validates a target URL before any network activity.
///
/// Surrounding whitespace is trimmed and `https://` is assumed when no
/// scheme is given. The result must be an http(s) URL with a host, no
/// longer than `MAX_URL_LENGTH`.
pub fn validate_and_normalize_url(url: &str) -> Result<Url, InvalidUrl> {
    let trimmed = url.trim();
    let invalid = |reason: String| {
        warn!("Skipping invalid URL '{trimmed}': {reason}");
        InvalidUrl {
            url: trimmed.to_string(),
            reason,
        }
    };

    if trimmed.is_empty() {
        return Err(invalid("empty URL".to_string()));
    }

    let normalized = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    // Checked after the prefix is added, since that can push it over
    if normalized.len() > MAX_URL_LENGTH {
        return Err(invalid(format!(
            "longer than {MAX_URL_LENGTH} characters ({})",
            normalized.len()
        )));
    }

    let parsed = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if !parsed.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    fn ok(url: &str) -> String {
        validate_and_normalize_url(url)
            .expect("URL should be accepted")
            .to_string()
    }

    #[test]
    fn test_adds_https() {
        assert_eq!(ok("example.com"), "https://example.com/");
        assert_eq!(ok("  www.example.com/app  "), "https://www.example.com/app");
    }

    #[test]
    fn test_preserves_scheme() {
        assert_eq!(ok("http://example.com"), "http://example.com/");
        assert_eq!(ok("https://example.com/a?b=c#d"), "https://example.com/a?b=c#d");
    }

    #[test]
    fn test_with_port() {
        assert_eq!(ok("example.com:8080"), "https://example.com:8080/");
    }

    #[test]
    fn test_ipv6() {
        assert_eq!(ok("[2001:db8::1]/path"), "https://[2001:db8::1]/path");
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        let err = validate_and_normalize_url("ftp://example.com").expect_err("ftp rejected");
        assert!(err.reason.contains("unsupported scheme"));
        assert!(validate_and_normalize_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(validate_and_normalize_url("").is_err());
        assert!(validate_and_normalize_url("   ").is_err());
        assert!(validate_and_normalize_url("not a url at all!!!").is_err());
        assert!(validate_and_normalize_url("://example.com").is_err());
        assert!(validate_and_normalize_url("http://").is_err());
    }

    #[test]
    fn test_length_limit() {
        // "https://example.com/" is 20 chars
        let at_limit = format!("https://example.com/{}", "a".repeat(2028));
        assert_eq!(at_limit.len(), 2048);
        assert!(validate_and_normalize_url(&at_limit).is_ok());

        let over = format!("https://example.com/{}", "a".repeat(2029));
        assert!(validate_and_normalize_url(&over).is_err());

        // Under the limit until the scheme is prepended
        let grows_over = format!("example.com/{}", "a".repeat(2030));
        assert!(grows_over.len() <= 2048);
        assert!(validate_and_normalize_url(&grows_over).is_err());
    }
}
