use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::{
    ErrorKind, InvalidReason, MalformedReason, Result,
    codec::encode_part,
    parser::{self, TEXT_DIRECTIVE_NAME},
    types::{Directive, TextDirectiveKind},
};

/// Text Directive represents the range of text in a document to highlight
/// for the user, with the syntax
///     text=[prefix-,]start[,end][,-suffix]
/// *start* is required with the other three terms marked as optional.
/// An empty string is NOT valid for any of the terms.
/// *start* with *end* constitutes a text range.
/// *prefix* and *suffix* are contextual terms; they are not part of the
/// highlighted text.
///
/// Fields are stored as plain (percent-decoded) text and encoded on output.
/// Equality compares the serialized form.
#[derive(Clone, Debug)]
pub struct TextDirective {
    /// Contextual term immediately before *start*, written with a trailing `-`
    prefix: Option<String>,
    /// If only start is given, the first instance of it is the target
    start: String,
    /// With this specified the target is the range from *start* to the first
    /// instance of *end* after it
    end: Option<String>,
    /// Contextual term immediately after the target, written with a leading `-`
    suffix: Option<String>,
}

impl TextDirective {
    /// Create a text directive matching `start` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDirective`] if `start` is empty.
    pub fn new(start: impl Into<String>) -> Result<Self> {
        Ok(Self {
            prefix: None,
            start: non_empty(TextDirectiveKind::Start, start.into())?,
            end: None,
            suffix: None,
        })
    }

    /// Build a text directive from fields that were already validated.
    pub(crate) const fn from_parts(
        prefix: Option<String>,
        start: String,
        end: Option<String>,
        suffix: Option<String>,
    ) -> Self {
        Self {
            prefix,
            start,
            end,
            suffix,
        }
    }

    /// Returns a copy with `prefix` set.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDirective`] if `prefix` is empty.
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            prefix: Some(non_empty(TextDirectiveKind::Prefix, prefix.into())?),
            ..self.clone()
        })
    }

    /// Returns a copy with `start` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDirective`] if `start` is empty.
    pub fn with_start(&self, start: impl Into<String>) -> Result<Self> {
        Ok(Self {
            start: non_empty(TextDirectiveKind::Start, start.into())?,
            ..self.clone()
        })
    }

    /// Returns a copy with `end` set, turning the directive into a range.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDirective`] if `end` is empty.
    pub fn with_end(&self, end: impl Into<String>) -> Result<Self> {
        Ok(Self {
            end: Some(non_empty(TextDirectiveKind::End, end.into())?),
            ..self.clone()
        })
    }

    /// Returns a copy with `suffix` set.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDirective`] if `suffix` is empty.
    pub fn with_suffix(&self, suffix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            suffix: Some(non_empty(TextDirectiveKind::Suffix, suffix.into())?),
            ..self.clone()
        })
    }

    /// Returns a copy without a prefix
    #[must_use]
    pub fn without_prefix(&self) -> Self {
        Self {
            prefix: None,
            ..self.clone()
        }
    }

    /// Returns a copy without an end
    #[must_use]
    pub fn without_end(&self) -> Self {
        Self {
            end: None,
            ..self.clone()
        }
    }

    /// Returns a copy without a suffix
    #[must_use]
    pub fn without_suffix(&self) -> Self {
        Self {
            suffix: None,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub fn start(&self) -> &str {
        self.start.as_str()
    }

    #[must_use]
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// `true` if the directive targets the range *start* to *end*
    #[must_use]
    pub const fn is_range(&self) -> bool {
        self.end.is_some()
    }

    /// The directive name, always `text`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        TEXT_DIRECTIVE_NAME
    }

    /// The percent-encoded directive body, without the leading `text=`
    #[must_use]
    pub fn value(&self) -> String {
        let mut value = String::new();

        if let Some(prefix) = &self.prefix {
            value.push_str(&encode_part(prefix));
            value.push_str("-,");
        }
        value.push_str(&encode_part(&self.start));
        if let Some(end) = &self.end {
            value.push(',');
            value.push_str(&encode_part(end));
        }
        if let Some(suffix) = &self.suffix {
            value.push_str(",-");
            value.push_str(&encode_part(suffix));
        }

        value
    }
}

fn non_empty(kind: TextDirectiveKind, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(InvalidReason::EmptyField(kind).into());
    }
    Ok(value)
}

impl Display for TextDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name(), self.value())
    }
}

impl PartialEq for TextDirective {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for TextDirective {}

impl Hash for TextDirective {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl FromStr for TextDirective {
    type Err = ErrorKind;

    /// Parse a single `text=...` token
    fn from_str(token: &str) -> Result<Self> {
        match parser::parse_token(token)? {
            Directive::Text(text) => Ok(text),
            Directive::Generic(_) => Err(ErrorKind::malformed(
                token,
                MalformedReason::NotTextDirective,
            )),
        }
    }
}
