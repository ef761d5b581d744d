//! Best-effort text decoding for CSV input.
//!
//! Tries a fixed list of encodings and accepts the first one that decodes
//! without errors. UTF-8 is authoritative when it succeeds; the Arabic
//! codepage is tried before the Latin fallback because single-byte decoders
//! accept almost any byte stream.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252, WINDOWS_1256};

use hri_model::LoadError;

const ENCODINGS: [&Encoding; 3] = [UTF_8, WINDOWS_1256, WINDOWS_1252];

/// Decode raw bytes into text, returning the decoded string and the label of
/// the encoding that accepted it.
///
/// # Errors
///
/// Returns [`LoadError::Encoding`] when every attempted encoding reports
/// decode errors.
pub fn decode_text(bytes: &[u8]) -> Result<(String, &'static str), LoadError> {
    for encoding in ENCODINGS {
        let (text, used, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok((strip_bom(&text).to_string(), used.name()));
        }
    }
    Err(LoadError::Encoding)
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
