//! `fragdir-lib` parses, queries and serializes fragment directives: the part
//! of a URL fragment after the `:~:` delimiter, as used by
//! [text fragments](https://wicg.github.io/scroll-to-text-fragment/).
//!
//! ```
//! use fragdir_lib::{Directive, FragmentDirectives};
//!
//! let directives = FragmentDirectives::new("#:~:text=with-,repeated,-instance&note=x")?;
//! assert_eq!(directives.len(), 2);
//!
//! let texts = directives.filter(Directive::is_text);
//! assert_eq!(texts.uri_component(), "#:~:text=with-,repeated,-instance");
//! # Ok::<(), fragdir_lib::ErrorKind>(())
//! ```
//!
//! Directives can also be read from and written back to a [`url::Url`] with
//! the [`UrlExt`] extension trait.
#![warn(clippy::all, clippy::pedantic)]
#![warn(
    absolute_paths_not_starting_with_crate,
    rustdoc::invalid_html_tags,
    missing_copy_implementations,
    missing_debug_implementations,
    semicolon_in_expressions_from_macros,
    unused_extern_crates,
    variant_size_differences
)]
#![deny(anonymous_parameters, macro_use_extern_crate)]
#![allow(clippy::must_use_candidate)]

pub mod codec;
pub mod parser;
mod types;

pub use types::*;

/// Build [`FragmentDirectives`] from a mixed list of directive values and raw
/// single-directive strings, preserving their order.
///
/// Evaluates to `Result<FragmentDirectives>`; raw strings which are not valid
/// directives fail with [`ErrorKind::MalformedDirective`].
///
/// ```
/// use fragdir_lib::{TextDirective, fragment_directives};
///
/// let directives = fragment_directives![
///     TextDirective::new("attributes")?.with_prefix("Deprecated")?,
///     "mydirectives=bbrown",
/// ]?;
/// assert_eq!(directives.value(), "text=Deprecated-,attributes&mydirectives=bbrown");
/// # Ok::<(), fragdir_lib::ErrorKind>(())
/// ```
#[macro_export]
macro_rules! fragment_directives {
    () => {
        ::std::result::Result::<$crate::FragmentDirectives, $crate::ErrorKind>::Ok(
            $crate::FragmentDirectives::default(),
        )
    };
    ($($item:expr),+ $(,)?) => {
        [$($crate::IntoDirective::into_directive($item)),+]
            .into_iter()
            .collect::<$crate::Result<$crate::FragmentDirectives>>()
    };
}
