//! Request path decoding
//!
//! Strict percent-decoding: every `%` must start a two-digit hex escape and
//! the decoded bytes must be valid UTF-8 without NUL.

use crate::error::ServeError;

/// Percent-decode a raw URI path
pub fn decode_path(raw: &str) -> Result<String, ServeError> {
    if !has_valid_escapes(raw) {
        return Err(ServeError::MalformedPath(raw.to_string()));
    }

    let decoded =
        urlencoding::decode(raw).map_err(|_| ServeError::MalformedPath(raw.to_string()))?;

    if decoded.contains('\0') {
        return Err(ServeError::MalformedPath(raw.to_string()));
    }

    Ok(decoded.into_owned())
}

/// Check that each `%` is followed by two hex digits
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
