//! Encoding helpers shared by the ceremony crates so that binary values cross the wire the same
//! way everywhere.

use data_encoding::{BASE64URL_NOPAD, BASE64_NOPAD};

const PADDING: char = '=';

/// Convert bytes to base64url without padding
pub fn base64url(data: &[u8]) -> String {
    BASE64URL_NOPAD.encode(data)
}

/// Try parsing from base64url in "loose" mode.
///
/// Padding is optional and non-zero trailing bits are accepted, matching what browsers and most
/// Relying Party libraries emit.
pub fn try_from_base64url(input: &str) -> Option<Vec<u8>> {
    let mut spec = BASE64URL_NOPAD.specification();
    spec.check_trailing_bits = false;
    let encoding = spec.encoding().ok()?;
    encoding
        .decode(input.trim_end_matches(PADDING).as_bytes())
        .ok()
}

/// Try parsing from standard base64 with or without padding
pub(crate) fn try_from_base64(input: &str) -> Option<Vec<u8>> {
    BASE64_NOPAD
        .decode(input.trim_end_matches(PADDING).as_bytes())
        .ok()
}
