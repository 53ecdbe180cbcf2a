mod generic;
mod text;

use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

pub use generic::GenericDirective;
pub use text::TextDirective;

use crate::{ErrorKind, Result, parser};

/// A single `&`-separated unit of a fragment directive
///
/// Two directives are equal if they serialize to the same string.
#[derive(Clone, Debug)]
pub enum Directive {
    /// `text=[prefix-,]start[,end][,-suffix]`
    Text(TextDirective),
    /// Any other `name=value` pair
    Generic(GenericDirective),
}

impl Directive {
    /// `text` for text directives, otherwise the raw name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Directive::Text(text) => text.name(),
            Directive::Generic(generic) => generic.name(),
        }
    }

    /// The percent-encoded body, without the `name=` part
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Directive::Text(text) => text.value(),
            Directive::Generic(generic) => generic.value().to_owned(),
        }
    }

    /// Returns `true` if this is a text directive
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Directive::Text(_))
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&TextDirective> {
        match self {
            Directive::Text(text) => Some(text),
            Directive::Generic(_) => None,
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Text(text) => Display::fmt(text, f),
            Directive::Generic(generic) => Display::fmt(generic, f),
        }
    }
}

impl PartialEq for Directive {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Directive {}

impl Hash for Directive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for Directive {
    type Err = ErrorKind;

    fn from_str(token: &str) -> Result<Self> {
        parser::parse_token(token)
    }
}

impl TryFrom<&str> for Directive {
    type Error = ErrorKind;

    fn try_from(token: &str) -> Result<Self> {
        parser::parse_token(token)
    }
}

impl From<TextDirective> for Directive {
    fn from(text: TextDirective) -> Self {
        Directive::Text(text)
    }
}

impl From<GenericDirective> for Directive {
    fn from(generic: GenericDirective) -> Self {
        Directive::Generic(generic)
    }
}

/// Anything that can be turned into a [`Directive`]: directive values, or raw
/// single-directive strings which are classified by the parser.
///
/// Used by [`fragment_directives!`](crate::fragment_directives) to accept a
/// mixed argument list.
pub trait IntoDirective {
    /// Convert into a [`Directive`]
    ///
    /// # Errors
    ///
    /// Raw strings fail with [`ErrorKind::MalformedDirective`] if they are
    /// not a valid directive token.
    fn into_directive(self) -> Result<Directive>;
}

impl IntoDirective for Directive {
    fn into_directive(self) -> Result<Directive> {
        Ok(self)
    }
}

impl IntoDirective for &Directive {
    fn into_directive(self) -> Result<Directive> {
        Ok(self.clone())
    }
}

impl IntoDirective for TextDirective {
    fn into_directive(self) -> Result<Directive> {
        Ok(Directive::Text(self))
    }
}

impl IntoDirective for GenericDirective {
    fn into_directive(self) -> Result<Directive> {
        Ok(Directive::Generic(self))
    }
}

impl IntoDirective for &str {
    fn into_directive(self) -> Result<Directive> {
        parser::parse_token(self)
    }
}

impl IntoDirective for String {
    fn into_directive(self) -> Result<Directive> {
        parser::parse_token(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_and_value() {
        let text: Directive = "text=Deprecated-,attributes,attribute".parse().unwrap();
        assert!(text.is_text());
        assert_eq!(text.name(), "text");
        assert_eq!(text.value(), "Deprecated-,attributes,attribute");

        let generic: Directive = "mydirection=maitreGims".parse().unwrap();
        assert!(!generic.is_text());
        assert!(generic.as_text().is_none());
        assert_eq!(generic.name(), "mydirection");
        assert_eq!(generic.value(), "maitreGims");
    }

    #[test]
    fn test_equality_across_construction_paths() {
        let built: Directive = TextDirective::new("linked URL")
            .and_then(|td| td.with_end("-'s format"))
            .unwrap()
            .into();
        let parsed = Directive::try_from("text=linked%20URL,%2D's%20format").unwrap();

        assert_eq!(built, parsed);
        assert_ne!(built, "mydirection=maitreGims".parse::<Directive>().unwrap());
    }

    #[test]
    fn test_into_directive() {
        assert!("text=start".into_directive().unwrap().is_text());
        assert!(String::from("a=b").into_directive().is_ok());
        assert!("foobar".into_directive().is_err());

        let generic = GenericDirective::new("a=b").unwrap();
        assert_eq!(generic.clone().into_directive(), Ok(Directive::Generic(generic)));
    }
}
