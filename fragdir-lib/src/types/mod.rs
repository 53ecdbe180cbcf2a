mod directive;
mod error;
mod fragment_directives;
mod kind;
mod url;

pub use directive::{Directive, GenericDirective, IntoDirective, TextDirective};
pub use error::{ErrorKind, InvalidReason, MalformedReason};
pub use fragment_directives::FragmentDirectives;
pub use kind::TextDirectiveKind;
pub use self::url::UrlExt;

/// The fragdir `Result` type
pub type Result<T> = std::result::Result<T, crate::ErrorKind>;
