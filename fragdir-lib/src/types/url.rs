use url::Url;

use crate::{parser::FRAGMENT_DIRECTIVE_DELIMITER, types::FragmentDirectives};

/// Fragment Directive extension trait
/// We use the extension trait pattern to extend [`url::Url`] with fragment directives
pub trait UrlExt {
    /// Checks if the url has a fragment and the fragment directive delimiter is present
    fn has_fragment_directive(&self) -> bool;

    /// Constructs [`FragmentDirectives`], if the URL contains a fragment with the
    /// fragment directive delimiter. Malformed directives are skipped.
    fn fragment_directives(&self) -> Option<FragmentDirectives>;

    /// Returns a copy of the URL whose directive section is replaced by
    /// `directives`. The document fragment before `:~:` is kept; an empty
    /// collection removes the directive section.
    #[must_use]
    fn with_fragment_directives(&self, directives: &FragmentDirectives) -> Url;
}

impl UrlExt for Url {
    /// **Note:** Fragment Directive is possible only for the URL that has a fragment
    fn has_fragment_directive(&self) -> bool {
        self.fragment()
            .is_some_and(|fragment| fragment.contains(FRAGMENT_DIRECTIVE_DELIMITER))
    }

    fn fragment_directives(&self) -> Option<FragmentDirectives> {
        FragmentDirectives::from_url(self)
    }

    fn with_fragment_directives(&self, directives: &FragmentDirectives) -> Url {
        let document_fragment = self
            .fragment()
            .map(|fragment| {
                fragment
                    .split_once(FRAGMENT_DIRECTIVE_DELIMITER)
                    .map_or(fragment, |(document, _)| document)
            })
            .unwrap_or_default();

        let fragment = if directives.is_empty() {
            document_fragment.to_owned()
        } else {
            format!("{document_fragment}{FRAGMENT_DIRECTIVE_DELIMITER}{directives}")
        };

        let mut url = self.clone();
        url.set_fragment((!fragment.is_empty()).then_some(fragment.as_str()));
        url
    }
}
