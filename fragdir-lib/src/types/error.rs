use thiserror::Error;

use crate::types::TextDirectiveKind;

/// Possible errors when parsing or building fragment directives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The fragment, or one of its `&`-separated tokens, cannot be classified
    /// as a text or generic directive
    #[error("Malformed directive `{directive}`: {reason}")]
    MalformedDirective {
        /// The offending token (or the whole fragment for delimiter errors)
        directive: String,
        /// Why the token was rejected
        reason: MalformedReason,
    },
    /// A directive value object was built from invalid parts
    #[error("Invalid directive: {0}")]
    InvalidDirective(#[from] InvalidReason),
}

impl ErrorKind {
    pub(crate) fn malformed(directive: &str, reason: MalformedReason) -> Self {
        Self::MalformedDirective {
            directive: directive.to_owned(),
            reason,
        }
    }

    /// Returns `true` if this is a parse failure rather than a construction failure
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDirective { .. })
    }
}

/// Reasons for [`ErrorKind::MalformedDirective`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedReason {
    /// The fragment has no `:~:` delimiter where one is required
    #[error("fragment directive delimiter `:~:` is missing")]
    MissingDelimiter,

    /// The token is not a `name=value` pair
    #[error("expected a `name=value` pair")]
    MissingAssignment,

    /// The token has an empty directive name (e.g. `=value`)
    #[error("directive name is empty")]
    EmptyName,

    /// A text directive was expected but the token has another name
    #[error("not a text directive")]
    NotTextDirective,

    /// The text directive body has the wrong number of comma-separated parts
    #[error("text directive has {0} comma-separated parts, expected 1 to 4")]
    FieldCount(usize),

    /// A text directive field is empty once its separators are stripped
    #[error("text directive {0} is empty")]
    EmptyField(TextDirectiveKind),

    /// Text directives are percent encoded; decoding produced invalid UTF-8
    #[error("percent-decoded {0} is not valid UTF-8: {1}")]
    PercentDecode(TextDirectiveKind, String),
}

/// Reasons for [`ErrorKind::InvalidDirective`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidReason {
    /// A text directive field was given as an empty string
    #[error("text directive {0} must not be empty")]
    EmptyField(TextDirectiveKind),

    /// A generic directive without `=`
    #[error("`{0}` is not a `name=value` pair")]
    MissingAssignment(String),

    /// A generic directive with nothing before the `=`
    #[error("`{0}` has an empty directive name")]
    EmptyName(String),

    /// A generic directive containing the `&` directive separator
    #[error("`{0}` contains the directive separator `&`")]
    ContainsSeparator(String),

    /// `text` is reserved for text directives
    #[error("`{0}` uses the reserved `text` name; build a `TextDirective` instead")]
    ReservedName(String),
}
