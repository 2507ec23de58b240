//! URL-safety policy for link and image targets.
//!
//! Only a small set of target shapes is allowed through; everything else
//! is rendered as literal text by the inline pipeline.

/// Check whether `url` may be emitted as an `href` or `src`.
///
/// - empty targets are rejected
/// - `javascript:` and `vbscript:` are rejected (ASCII case-insensitive)
/// - `data:` is allowed only for `image/*` media types
/// - `http://` and `https://` are allowed
/// - `/`, `./` and `../` paths are allowed
/// - anything else is allowed only if it has no `:` (a plain relative path)
///
/// # Example
/// ```
/// use inkpress::url::is_safe_url;
///
/// assert!(is_safe_url("photo.png"));
/// assert!(is_safe_url("https://example.com"));
/// assert!(!is_safe_url("javascript:alert(1)"));
/// assert!(!is_safe_url("mailto:me@example.com"));
/// ```
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }

    let bytes = url.as_bytes();
    if starts_with_ignore_case(bytes, b"javascript:") || starts_with_ignore_case(bytes, b"vbscript:") {
        return false;
    }
    if starts_with_ignore_case(bytes, b"data:") {
        return starts_with_ignore_case(bytes, b"data:image/");
    }
    if is_external(url) {
        return true;
    }
    if url.starts_with('/') || url.starts_with("./") || url.starts_with("../") {
        return true;
    }

    memchr::memchr(b':', bytes).is_none()
}

/// Whether a target points off-site (`http://` or `https://`).
///
/// External links get `target="_blank"` and `rel="noopener noreferrer"`.
#[inline]
pub fn is_external(url: &str) -> bool {
    let bytes = url.trim_start().as_bytes();
    starts_with_ignore_case(bytes, b"http://") || starts_with_ignore_case(bytes, b"https://")
}

#[inline]
fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}
