//! Content fingerprints and filesystem-safe asset names.

use sha2::{Digest, Sha256};
use url::Url;

use crate::config::{FINGERPRINT_PREFIX_LEN, MAX_FILENAME_LEN};

/// Characters that are rejected by at least one common filesystem.
const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\''];

/// Computes the SHA-256 fingerprint of `bytes` as 64 lower-case hex characters.
pub fn content_fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// First `FINGERPRINT_PREFIX_LEN` characters of a fingerprint.
pub fn fingerprint_prefix(fingerprint: &str) -> &str {
    let end = fingerprint.len().min(FINGERPRINT_PREFIX_LEN);
    &fingerprint[..end]
}

/// Makes `text` usable as part of a filename.
///
/// Forbidden characters and ASCII control characters become `_`, runs of `_`
/// collapse to one, and leading/trailing `_` are trimmed.
pub fn sanitize_filename_part(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let c = if FORBIDDEN_FILENAME_CHARS.contains(&c) || c.is_ascii_control() {
            '_'
        } else {
            c
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

/// Builds the filename for an external asset.
///
/// `<host[_port]>_<path without extension>_<fp8>.js`, with empty parts left out.
/// Query and fragment do not contribute; the fingerprint keeps names unique
/// per content.
pub fn build_filename(url: &Url, bytes: &[u8]) -> String {
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };
    let path = strip_extension(url.path().trim_start_matches('/'));

    let stem = join_parts(&[
        sanitize_filename_part(&host.to_ascii_lowercase()),
        sanitize_filename_part(path),
    ]);
    assemble(&stem, &content_fingerprint(bytes))
}

/// Builds the filename for an inline script found on a page of `domain`.
///
/// `<domain>_inline_<fp8>.js`
pub fn build_inline_filename(domain: &str, bytes: &[u8]) -> String {
    let stem = join_parts(&[sanitize_filename_part(domain), "inline".to_string()]);
    assemble(&stem, &content_fingerprint(bytes))
}

/// Removes the extension of the last path segment, if it has one.
fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind('.') {
        // A leading dot (".env") is a name, not an extension
        Some(dot) if dot > 0 => &path[..segment_start + dot],
        _ => path,
    }
}

fn join_parts(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("_")
}

/// Appends `_<fp8>.js`, truncating the stem so the whole name fits in
/// `MAX_FILENAME_LEN` bytes. The fingerprint suffix is never cut.
fn assemble(stem: &str, fingerprint: &str) -> String {
    let prefix = fingerprint_prefix(fingerprint);
    if stem.is_empty() {
        return format!("{prefix}.js");
    }

    let suffix_len = 1 + prefix.len() + ".js".len();
    let max_stem = MAX_FILENAME_LEN - suffix_len;
    let stem = if stem.len() > max_stem {
        let mut cut = max_stem;
        while !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        stem[..cut].trim_end_matches('_')
    } else {
        stem
    };
    format!("{stem}_{prefix}.js")
}
