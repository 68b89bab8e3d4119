//! Well-known URL construction
//!
//! Handles are embedded verbatim in the URL authority, so anything that would
//! need percent-encoding there is rejected instead of encoded.

use crate::error::{ResolveError, Result};
use tracing::debug;

pub const WELL_KNOWN_PATH: &str = "/.well-known/atproto-did";

/// Longest well-known URL accepted, in bytes (a 256-byte buffer minus its terminator)
pub const URL_MAX_LEN: usize = 255;

/// Normalize handle input (trims whitespace, strips `at://`, `@` and a trailing dot)
pub fn normalize_handle(handle: &str) -> &str {
    let handle = handle.trim();
    let handle = handle
        .strip_prefix("at://")
        .or_else(|| handle.strip_prefix('@'))
        .unwrap_or(handle);
    handle.strip_suffix('.').unwrap_or(handle)
}

/// Check that a normalized handle can be placed in a URL authority as-is
pub fn check_handle(handle: &str) -> Result<()> {
    if handle.is_empty() {
        return Err(ResolveError::InvalidHandle(
            "handle cannot be empty".to_string(),
        ));
    }

    if let Some(c) = handle.chars().find(|c| !is_authority_char(*c)) {
        return Err(ResolveError::InvalidHandle(format!(
            "character {:?} is not allowed in a handle",
            c
        )));
    }

    Ok(())
}

// RFC 3986 reg-name (unreserved + sub-delims) plus port and IP-literal brackets
fn is_authority_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ','
                | ';' | '=' | ':' | '[' | ']'
        )
}

/// Build `https://{handle}/.well-known/atproto-did`, failing rather than truncating
pub fn well_known_url(handle: &str, max_len: usize) -> Result<String> {
    let handle = normalize_handle(handle);
    check_handle(handle)?;

    let len = "https://".len() + handle.len() + WELL_KNOWN_PATH.len();
    if len > max_len {
        return Err(ResolveError::UrlTooLong { len, max: max_len });
    }

    let url = format!("https://{}{}", handle, WELL_KNOWN_PATH);
    debug_assert_eq!(url.len(), len);

    // Stray `:` or unbalanced brackets leave an authority the client cannot parse
    if let Err(e) = reqwest::Url::parse(&url) {
        return Err(ResolveError::InvalidHandle(format!(
            "{:?} does not form a valid URL authority: {}",
            handle, e
        )));
    }
    debug!(handle, url = %url, "Built well-known URL");
    Ok(url)
}
