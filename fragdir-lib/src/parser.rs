//! Tokenizer for the directive section of a URL fragment.
//!
//! A directive section is the part of a fragment after the `:~:` delimiter:
//! a list of `&`-separated `name=value` tokens. Tokens named `text` are parsed
//! as [`TextDirective`]s, anything else is kept verbatim as a
//! [`GenericDirective`].
//!
//! Separators are never percent-decoded before splitting, so an encoded `%26`
//! or `%2C` stays inside its token or field.
use log::debug;

use crate::{
    ErrorKind, MalformedReason, Result,
    codec::decode_part,
    types::{Directive, GenericDirective, TextDirective, TextDirectiveKind},
};

/// Fragment directive delimiter constant
pub const FRAGMENT_DIRECTIVE_DELIMITER: &str = ":~:";

/// Separates directives within the directive section
pub const DIRECTIVE_SEPARATOR: char = '&';

pub(crate) const TEXT_DIRECTIVE_NAME: &str = "text";

/// A text directive has at most `prefix-,start,end,-suffix`
const MAX_TEXT_DIRECTIVE_PARTS: usize = 4;

/// Strip an optional leading `#` and `:~:` delimiter.
#[must_use]
pub fn strip_delimiter(raw: &str) -> &str {
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    raw.strip_prefix(FRAGMENT_DIRECTIVE_DELIMITER).unwrap_or(raw)
}

/// Find the directive section of a full URL fragment, i.e. everything after
/// the first `:~:`. The document fragment before it is ignored.
///
/// # Errors
///
/// Returns [`ErrorKind::MalformedDirective`] if there is no `:~:` delimiter.
pub fn directive_section(fragment: &str) -> Result<&str> {
    fragment
        .find(FRAGMENT_DIRECTIVE_DELIMITER)
        .map(|offset| &fragment[offset + FRAGMENT_DIRECTIVE_DELIMITER.len()..])
        .ok_or_else(|| ErrorKind::malformed(fragment, MalformedReason::MissingDelimiter))
}

/// Split a directive section into its raw tokens.
/// An empty section has no tokens.
pub fn split_directives(section: &str) -> impl Iterator<Item = &str> {
    (!section.is_empty())
        .then(|| section.split(DIRECTIVE_SEPARATOR))
        .into_iter()
        .flatten()
}

/// Parse a fragment body, with or without its `#:~:`/`:~:` prefix, into an
/// ordered list of directives.
///
/// # Errors
///
/// Fails on the first token that is not a valid directive.
pub fn parse_fragment_body(raw: &str) -> Result<Vec<Directive>> {
    split_directives(strip_delimiter(raw))
        .map(parse_token)
        .collect()
}

/// Parse a full URL fragment which must contain the `:~:` delimiter.
///
/// # Errors
///
/// Fails if the delimiter is missing or any token is malformed.
pub fn parse_fragment(fragment: &str) -> Result<Vec<Directive>> {
    let section = directive_section(fragment.strip_prefix('#').unwrap_or(fragment))?;
    split_directives(section).map(parse_token).collect()
}

/// Classify and parse a single `&`-delimited token.
///
/// # Errors
///
/// Returns [`ErrorKind::MalformedDirective`] if the token is not a
/// `name=value` pair, has an empty name, or is a `text` directive whose body
/// cannot be parsed.
pub fn parse_token(token: &str) -> Result<Directive> {
    let Some((name, body)) = token.split_once('=') else {
        return Err(ErrorKind::malformed(token, MalformedReason::MissingAssignment));
    };

    if name == TEXT_DIRECTIVE_NAME {
        debug!("text directive: {token}");
        return parse_text_body(token, body).map(Directive::Text);
    }

    debug!("generic directive: {token}");
    GenericDirective::new(token)
        .map(Directive::Generic)
        .map_err(|_| {
            let reason = if name.is_empty() {
                MalformedReason::EmptyName
            } else {
                // the token came from splitting on `&`, so the only
                // remaining failure is the missing assignment
                MalformedReason::MissingAssignment
            };
            ErrorKind::malformed(token, reason)
        })
}

/// Parse the body of a text directive (everything after `text=`)
///
/// The body is split on unescaped `,` first; a first part ending in `-` is the
/// prefix and a last part starting with `-` is the suffix. What remains is
/// *start* and an optional *end*. Raw whitespace around each part is ignored.
fn parse_text_body(token: &str, body: &str) -> Result<TextDirective> {
    let malformed = |reason| ErrorKind::malformed(token, reason);

    let mut parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() > MAX_TEXT_DIRECTIVE_PARTS {
        return Err(malformed(MalformedReason::FieldCount(parts.len())));
    }
    let part_count = parts.len();

    let prefix = match parts.first().and_then(|first| first.strip_suffix('-')) {
        Some(prefix) => {
            parts.remove(0);
            Some(decode_field(token, TextDirectiveKind::Prefix, prefix)?)
        }
        None => None,
    };

    let suffix = match parts.last().and_then(|last| last.strip_prefix('-')) {
        Some(suffix) => {
            parts.pop();
            Some(decode_field(token, TextDirectiveKind::Suffix, suffix)?)
        }
        None => None,
    };

    let (start, end) = match parts.as_slice() {
        [] => return Err(malformed(MalformedReason::EmptyField(TextDirectiveKind::Start))),
        [start] => (decode_field(token, TextDirectiveKind::Start, start)?, None),
        [start, end] => (
            decode_field(token, TextDirectiveKind::Start, start)?,
            Some(decode_field(token, TextDirectiveKind::End, end)?),
        ),
        _ => return Err(malformed(MalformedReason::FieldCount(part_count))),
    };

    Ok(TextDirective::from_parts(prefix, start, end, suffix))
}

/// Percent-decode one text directive field, rejecting empty fields
fn decode_field(token: &str, kind: TextDirectiveKind, raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ErrorKind::malformed(token, MalformedReason::EmptyField(kind)));
    }

    decode_part(raw).map_err(|e| {
        ErrorKind::malformed(token, MalformedReason::PercentDecode(kind, e.to_string()))
    })
}
