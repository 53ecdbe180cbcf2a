//! Percent-encoding for the fields of a text directive.
//!
//! The directive grammar uses `,` and `-` to separate the fields of a text
//! directive and `&` to separate directives, so literal occurrences inside a
//! field are always escaped.
//!
//! Fields are plain text: a `%` in a field is a literal percent sign and is
//! encoded as `%25`. Percent-encoded input is decoded once by the parser, so
//! `decode_part(&encode_part(s)) == s` for every field.
//!
//! ```
//! use fragdir_lib::codec::{decode_part, encode_part};
//!
//! assert_eq!(encode_part("-'s format"), "%2D's%20format");
//! assert_eq!(encode_part("100% sure"), "100%25%20sure");
//! assert_eq!(decode_part("%2D's%20format").unwrap(), "-'s format");
//! ```
use std::str::Utf8Error;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Bytes escaped inside a directive field.
///
/// This is the URL fragment set plus `%` and the directive separators.
const FIELD: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'%')
    .add(b',')
    .add(b'-')
    .add(b'&');

/// Percent-encode a plain-text field for use inside a text directive.
///
/// Non-ASCII characters are UTF-8 percent-encoded.
#[must_use]
pub fn encode_part(text: &str) -> String {
    utf8_percent_encode(text, FIELD).to_string()
}

/// Percent-decode a directive field back into plain text.
///
/// # Errors
///
/// Fails if the decoded bytes are not valid UTF-8.
pub fn decode_part(text: &str) -> Result<String, Utf8Error> {
    percent_decode_str(text)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
}
