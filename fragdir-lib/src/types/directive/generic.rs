use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{ErrorKind, InvalidReason, Result, parser::TEXT_DIRECTIVE_NAME};

/// Any `name=value` directive other than `text`, kept verbatim
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericDirective {
    raw: String,
    /// Byte offset of the first `=` in `raw`
    separator: usize,
}

impl GenericDirective {
    /// Wrap a raw `name=value` directive.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDirective`] if `raw` has no `=`, has an
    /// empty name, contains `&`, or is named `text`.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();

        let Some(separator) = raw.find('=') else {
            return Err(InvalidReason::MissingAssignment(raw).into());
        };
        if separator == 0 {
            return Err(InvalidReason::EmptyName(raw).into());
        }
        if raw.contains('&') {
            return Err(InvalidReason::ContainsSeparator(raw).into());
        }
        if &raw[..separator] == TEXT_DIRECTIVE_NAME {
            return Err(InvalidReason::ReservedName(raw).into());
        }

        Ok(Self { raw, separator })
    }

    /// The part before the first `=`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.raw[..self.separator]
    }

    /// The part after the first `=`, exactly as given
    #[must_use]
    pub fn value(&self) -> &str {
        &self.raw[self.separator + 1..]
    }

    /// The whole `name=value` string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Display for GenericDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for GenericDirective {
    type Err = ErrorKind;

    fn from_str(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mydirectives=bbrown", "mydirectives", "bbrown")]
    #[case("mydirection=maitreGims", "mydirection", "maitreGims")]
    #[case("note=", "note", "")]
    #[case("eq=a=b", "eq", "a=b")]
    #[case("textual=x", "textual", "x")]
    fn test_name_and_value(#[case] raw: &str, #[case] name: &str, #[case] value: &str) {
        let directive = GenericDirective::new(raw).unwrap();
        assert_eq!(directive.name(), name);
        assert_eq!(directive.value(), value);
        assert_eq!(directive.to_string(), raw);
    }

    #[rstest]
    #[case("unknownDirective", InvalidReason::MissingAssignment("unknownDirective".into()))]
    #[case("=value", InvalidReason::EmptyName("=value".into()))]
    #[case("a=b&c=d", InvalidReason::ContainsSeparator("a=b&c=d".into()))]
    #[case("text=start", InvalidReason::ReservedName("text=start".into()))]
    fn test_invalid(#[case] raw: &str, #[case] reason: InvalidReason) {
        assert_eq!(GenericDirective::new(raw), Err(ErrorKind::InvalidDirective(reason)));
    }
}
