//! Utilities for sanitizing error messages.
//!
//! Removes control characters from error messages before they are stored in
//! the ledger and printed in the run summary, and truncates overlong ones.

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can
/// garble terminal output and log files.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .filter(|c| *c != '\u{7f}')
        .collect()
}

/// Sanitizes and truncates an error message to `MAX_ERROR_MESSAGE_LENGTH`.
///
/// Truncated messages end with a note carrying the original length.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);

    if sanitized.len() > crate::config::MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let mut truncate_len = crate::config::MAX_ERROR_MESSAGE_LENGTH
            .saturating_sub(50)
            .min(sanitized.len());
        while !sanitized.is_char_boundary(truncate_len) {
            truncate_len -= 1;
        }
        format!(
            "{}... (truncated, original length: {} chars)",
            &sanitized[..truncate_len],
            sanitized.len()
        )
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_error_message_removes_control_chars() {
        let input = "Error\x00message\x01with\x02control\x03chars\x7f";
        let output = sanitize_error_message(input);
        assert_eq!(output, "Errormessagewithcontrolchars");
    }

    #[test]
    fn test_sanitize_error_message_preserves_whitespace() {
        let input = "Error\nmessage\twith\r\nwhitespace";
        assert_eq!(sanitize_error_message(input), input);
    }

    #[test]
    fn test_sanitize_error_message_preserves_unicode() {
        let input = "Error message with unicode: 测试 🚀";
        let output = sanitize_error_message(input);
        assert_eq!(output, "Error message with unicode: 测试 🚀");
    }

    #[test]
    fn test_truncate_long_message() {
        let input = "x".repeat(crate::config::MAX_ERROR_MESSAGE_LENGTH + 10);
        let output = sanitize_and_truncate_error_message(&input);
        assert!(output.len() < input.len());
        assert!(output.contains("truncated, original length"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let input = "测".repeat(crate::config::MAX_ERROR_MESSAGE_LENGTH);
        let output = sanitize_and_truncate_error_message(&input);
        assert!(output.contains("truncated"));
    }

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(sanitize_and_truncate_error_message("short"), "short");
    }
}
