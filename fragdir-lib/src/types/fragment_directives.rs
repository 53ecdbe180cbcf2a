//! Fragment Directives is the ordered collection of directives found in a
//! URL's fragment after the `:~:` delimiter.
//!
//! The collection is immutable: operations which look like mutations
//! (`filter`, `remove`, `append`) return a new collection.
//!
//! # Example
//!
//! ```rust
//! use fragdir_lib::{FragmentDirectives, TextDirective, fragment_directives};
//!
//! let directives = fragment_directives![
//!     TextDirective::new("linked URL")?.with_end("-'s format")?,
//!     "mydirection=maitreGims",
//! ]?;
//!
//! assert_eq!(directives.len(), 2);
//! assert_eq!(
//!     directives.uri_component(),
//!     "#:~:text=linked%20URL,%2D's%20format&mydirection=maitreGims"
//! );
//! assert!(directives.equals(&":~:text=linked%20URL,%2D's%20format&mydirection=maitreGims"));
//! # Ok::<(), fragdir_lib::ErrorKind>(())
//! ```
use std::{
    any::Any,
    fmt::{self, Display},
    str::FromStr,
};

use log::warn;
use serde::{Deserialize, Serialize, Serializer, de::Visitor};
use url::Url;

use crate::{
    ErrorKind, Result,
    parser::{self, DIRECTIVE_SEPARATOR, FRAGMENT_DIRECTIVE_DELIMITER},
    types::{Directive, IntoDirective, TextDirective},
};

/// Ordered list of [`Directive`]s. Duplicates are allowed.
///
/// Equality compares the canonical serialization, see [`FragmentDirectives::value`].
#[derive(Default, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FragmentDirectives {
    directives: Vec<Directive>,
}

impl FragmentDirectives {
    /// Parse a fragment directive, with or without its leading `#:~:`/`:~:`.
    ///
    /// An empty input yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDirective`] on the first token that is not
    /// a valid directive.
    pub fn new(raw: &str) -> Result<Self> {
        parser::parse_fragment_body(raw).map(Self::from)
    }

    /// Same as [`FragmentDirectives::new`] but returns `None` instead of an error
    #[must_use]
    pub fn try_new(raw: &str) -> Option<Self> {
        Self::new(raw).ok()
    }

    /// Parse a fragment directive, skipping malformed tokens instead of
    /// failing on them.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        parser::split_directives(parser::strip_delimiter(raw))
            .filter_map(|token| match parser::parse_token(token) {
                Ok(directive) => Some(directive),
                Err(e) => {
                    warn!("Skipping directive `{token}`: {e}");
                    None
                }
            })
            .collect()
    }

    /// Build a collection from directive values and/or raw single-directive
    /// strings, preserving their order.
    ///
    /// See [`fragment_directives!`](crate::fragment_directives) for a mixed
    /// argument list.
    ///
    /// # Errors
    ///
    /// Fails if a raw string is not a valid directive.
    pub fn try_from_items<I, T>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoDirective,
    {
        items.into_iter().map(IntoDirective::into_directive).collect()
    }

    /// Finds the fragment directive in the URL's fragment, skipping malformed
    /// directives.
    /// Returns `None` if the URL has no fragment or no `:~:` delimiter.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        let fragment = url.fragment()?;
        let section = parser::directive_section(fragment).ok()?;
        Some(Self::parse_lenient(section))
    }

    /// Number of directives
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Directive> {
        self.directives.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Directive> {
        self.directives.last()
    }

    /// Zero-based access; out of range yields `None`
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Directive> {
        self.directives.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    /// Iterate over the text directives only
    pub fn text_directives(&self) -> impl Iterator<Item = &TextDirective> {
        self.directives.iter().filter_map(Directive::as_text)
    }

    /// New collection with the directives matching `predicate`, in order
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&Directive) -> bool,
    {
        self.directives
            .iter()
            .filter(|directive| predicate(directive))
            .cloned()
            .collect()
    }

    /// Returns `true` if a directive serializes to the same string as `target`.
    ///
    /// `target` can be any directive type or a raw `name=value` string.
    pub fn contains<T: Display + ?Sized>(&self, target: &T) -> bool {
        let target = target.to_string();
        self.directives
            .iter()
            .any(|directive| directive.to_string() == target)
    }

    /// Returns `true` if every index is in range. An empty list of indices
    /// returns `false`.
    #[must_use]
    pub fn has(&self, indices: &[usize]) -> bool {
        !indices.is_empty() && indices.iter().all(|&index| index < self.len())
    }

    /// New collection without the directives at `indices`.
    ///
    /// Indices refer to this collection; out-of-range and repeated indices
    /// are ignored.
    #[must_use]
    pub fn remove(&self, indices: &[usize]) -> Self {
        self.directives
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, directive)| directive.clone())
            .collect()
    }

    /// New collection with `directives` added at the end
    #[must_use]
    pub fn append<I>(&self, directives: I) -> Self
    where
        I: IntoIterator<Item = Directive>,
    {
        self.directives.iter().cloned().chain(directives).collect()
    }

    /// The canonical `&`-joined serialization, without the `:~:` delimiter
    #[must_use]
    pub fn value(&self) -> String {
        self.directives
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&DIRECTIVE_SEPARATOR.to_string())
    }

    /// [`FragmentDirectives::value`] prefixed with `#:~:`, ready to be used as
    /// a URL fragment
    #[must_use]
    pub fn uri_component(&self) -> String {
        format!("#{FRAGMENT_DIRECTIVE_DELIMITER}{}", self.value())
    }

    /// Compare against a value of any type.
    ///
    /// `FragmentDirectives` compare by value, strings are parsed first and
    /// compare unequal if they do not parse. Any other type is unequal.
    #[must_use]
    pub fn equals(&self, other: &dyn Any) -> bool {
        if let Some(other) = other.downcast_ref::<FragmentDirectives>() {
            return self == other;
        }
        if let Some(other) = other.downcast_ref::<String>() {
            return self == other.as_str();
        }
        if let Some(other) = other.downcast_ref::<&str>() {
            return self == *other;
        }
        false
    }
}

impl From<Vec<Directive>> for FragmentDirectives {
    fn from(directives: Vec<Directive>) -> Self {
        Self { directives }
    }
}

impl FromIterator<Directive> for FragmentDirectives {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self {
            directives: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FragmentDirectives {
    type Item = Directive;
    type IntoIter = std::vec::IntoIter<Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.into_iter()
    }
}

impl<'a> IntoIterator for &'a FragmentDirectives {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

impl Display for FragmentDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl FromStr for FragmentDirectives {
    type Err = ErrorKind;

    fn from_str(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}

impl PartialEq<str> for FragmentDirectives {
    fn eq(&self, other: &str) -> bool {
        Self::try_new(other).is_some_and(|other| *self == other)
    }
}

impl PartialEq<&str> for FragmentDirectives {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for FragmentDirectives {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl Serialize for FragmentDirectives {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value())
    }
}

struct FragmentDirectivesVisitor;

impl Visitor<'_> for FragmentDirectivesVisitor {
    type Value = FragmentDirectives;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a fragment directive string")
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        FragmentDirectives::new(v).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FragmentDirectives {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(FragmentDirectivesVisitor)
    }
}
