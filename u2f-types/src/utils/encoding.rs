//! Utility functions for encoding datatypes in a consistent way across the `u2f` libraries.
//!
//! U2F transports every binary field of its JSON messages as "websafe" base64, meaning the
//! base64url alphabet without padding.

use data_encoding::{BASE64URL_NOPAD, BASE64_NOPAD, HEXLOWER};

const PADDING: char = '=';

/// Convert bytes to base64 without padding
pub fn base64(data: &[u8]) -> String {
    BASE64_NOPAD.encode(data)
}

/// Convert bytes to base64url without padding
pub fn base64url(data: &[u8]) -> String {
    BASE64URL_NOPAD.encode(data)
}

/// Try parsing from base64 with or without padding
pub(crate) fn try_from_base64(input: &str) -> Option<Vec<u8>> {
    let sane_string = input.trim_end_matches(PADDING);
    BASE64_NOPAD.decode(sane_string.as_bytes()).ok()
}

/// Try parsing from base64url with or without padding
pub fn try_from_base64url(input: &str) -> Option<Vec<u8>> {
    let sane_string = input.trim_end_matches(PADDING);
    BASE64URL_NOPAD.decode(sane_string.as_bytes()).ok()
}

/// Lowercase hexadecimal representation, used when logging raw protocol bytes.
pub fn hex(data: &[u8]) -> String {
    HEXLOWER.encode(data)
}

/// Parse a hexadecimal string, accepting either case.
pub fn try_from_hex(input: &str) -> Option<Vec<u8>> {
    HEXLOWER
        .decode(input.to_ascii_lowercase().as_bytes())
        .ok()
}
