use percent_encoding::percent_decode_str;

use crate::error::DecodeError;

/// Splits a request path into its decoded, lowercased segments.
///
/// The path is split on the raw `/` characters before each piece is decoded, so an
/// encoded slash (`%2F`) ends up inside a segment value instead of creating a new one.
/// A single trailing `/` is ignored and the root path yields no segments at all.
/// Empty interior segments (`//`) are kept as empty strings.
pub fn normalize(raw: &str) -> Result<Vec<String>, DecodeError> {
    validate_escapes(raw)?;
    split(raw).into_iter().map(decode_segment).collect()
}

/// Trims a single trailing slash and splits on `/`, dropping the leading empty piece.
pub(crate) fn split(path: &str) -> Vec<&str> {
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

fn validate_escapes(raw: &str) -> Result<(), DecodeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(DecodeError::MalformedEscape(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn decode_segment(piece: &str) -> Result<String, DecodeError> {
    percent_decode_str(piece)
        .decode_utf8()
        .map(|decoded| decoded.to_lowercase())
        .map_err(|_| DecodeError::InvalidUtf8(piece.to_string()))
}
