//! Normalizing a single command-line input.
//!
//! An input is either an absolute URL, whose fragment directive is replaced
//! in place, or a bare fragment directive (`#:~:...`, `:~:...` or just the
//! `&`-separated directives), which is printed as a `#:~:` fragment.
use anyhow::{Context, Result};
use fragdir_lib::{Directive, FragmentDirectives, TextDirective, UrlExt, parser};
use log::{debug, error};
use serde::Serialize;
use url::Url;

use crate::options::Config;

/// The edits applied to the directives of every input
#[derive(Debug, Clone, Default)]
pub(crate) struct Edits {
    lenient: bool,
    text_only: bool,
    remove: Vec<usize>,
    append: Vec<Directive>,
}

impl Edits {
    /// # Errors
    ///
    /// Fails if a directive passed with `--append` is malformed.
    pub(crate) fn from_config(config: &Config) -> Result<Self> {
        let append = config
            .append
            .iter()
            .map(|raw| {
                raw.parse::<Directive>()
                    .with_context(|| format!("Invalid directive to append: `{raw}`"))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            lenient: config.lenient,
            text_only: config.text_only,
            remove: config.remove.clone(),
            append,
        })
    }

    /// Indices in `--remove` refer to the parsed directives, so removal
    /// happens before anything is appended.
    fn apply(&self, directives: &FragmentDirectives) -> FragmentDirectives {
        let edited = directives
            .remove(&self.remove)
            .append(self.append.iter().cloned());

        if self.text_only {
            edited.filter(Directive::is_text)
        } else {
            edited
        }
    }

    fn read_url(&self, url: &Url) -> Result<FragmentDirectives> {
        if !url.has_fragment_directive() {
            debug!("`{url}` has no fragment directive");
            return Ok(FragmentDirectives::default());
        }
        if self.lenient {
            return Ok(url.fragment_directives().unwrap_or_default());
        }

        let fragment = url.fragment().unwrap_or_default();
        parser::parse_fragment(fragment)
            .map(FragmentDirectives::from)
            .with_context(|| format!("Cannot parse fragment directive of `{url}`"))
    }

    fn read_fragment(&self, fragment: &str) -> Result<FragmentDirectives> {
        if self.lenient {
            return Ok(FragmentDirectives::parse_lenient(fragment));
        }
        FragmentDirectives::new(fragment)
            .with_context(|| format!("Cannot parse fragment directive `{fragment}`"))
    }
}

/// Fields of a text directive, decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TextFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) prefix: Option<String>,
    pub(crate) start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) suffix: Option<String>,
}

impl From<&TextDirective> for TextFields {
    fn from(text: &TextDirective) -> Self {
        Self {
            prefix: text.prefix().map(ToOwned::to_owned),
            start: text.start().to_owned(),
            end: text.end().map(ToOwned::to_owned),
            suffix: text.suffix().map(ToOwned::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DirectiveReport {
    pub(crate) name: String,
    /// Encoded value, without `name=`
    pub(crate) value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<TextFields>,
}

impl From<&Directive> for DirectiveReport {
    fn from(directive: &Directive) -> Self {
        Self {
            name: directive.name().to_owned(),
            value: directive.value(),
            text: directive.as_text().map(TextFields::from),
        }
    }
}

/// The outcome for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Report {
    pub(crate) input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    pub(crate) directives: Vec<DirectiveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl Report {
    fn ok(input: &str, output: String, directives: &FragmentDirectives) -> Self {
        Self {
            input: input.to_owned(),
            output: Some(output),
            directives: directives.iter().map(DirectiveReport::from).collect(),
            error: None,
        }
    }

    fn failed(input: &str, error: &anyhow::Error) -> Self {
        Self {
            input: input.to_owned(),
            output: None,
            directives: Vec::new(),
            error: Some(format!("{error:#}")),
        }
    }

    /// The normalized URL or fragment, `None` if the input failed
    pub(crate) fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub(crate) const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse, edit and re-serialize one input
pub(crate) fn process(input: &str, edits: &Edits) -> Report {
    match normalize(input, edits) {
        Ok((output, directives)) => Report::ok(input, output, &directives),
        Err(e) => {
            error!("{e:#}");
            Report::failed(input, &e)
        }
    }
}

/// Parse `input` as a URL unless it reads as a bare directive list.
///
/// A generic directive name may contain `:`, so `ns:key=v&text=a` parses as
/// an opaque URL with scheme `ns`. Such inputs only count as URLs if they
/// carry a fragment.
fn parse_url(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| url.fragment().is_some() || !url.cannot_be_a_base())
}

fn normalize(input: &str, edits: &Edits) -> Result<(String, FragmentDirectives)> {
    if let Some(url) = parse_url(input) {
        let directives = edits.apply(&edits.read_url(&url)?);
        debug!("{} directive(s) for `{url}`", directives.len());
        return Ok((url.with_fragment_directives(&directives).to_string(), directives));
    }

    let directives = edits.apply(&edits.read_fragment(input)?);
    debug!("{} directive(s) for `{input}`", directives.len());
    Ok((directives.uri_component(), directives))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edits(config: Config) -> Edits {
        Edits::from_config(&config).unwrap()
    }

    #[test]
    fn test_normalize_fragment() {
        let report = process(":~:text=with-,repeated, For, -instance&note=x", &Edits::default());

        assert!(report.is_ok());
        assert_eq!(
            report.output(),
            Some("#:~:text=with-,repeated,For,-instance&note=x")
        );
        assert_eq!(report.directives.len(), 2);
        assert_eq!(
            report.directives[0].text,
            Some(TextFields {
                prefix: Some("with".to_string()),
                start: "repeated".to_string(),
                end: Some("For".to_string()),
                suffix: Some("instance".to_string()),
            })
        );
        assert_eq!(report.directives[1].text, None);
    }

    #[test]
    fn test_normalize_url() {
        let report = process(
            "https://example.com/page#section:~:text=linked%20URL,-'s%20format",
            &Edits::default(),
        );

        assert_eq!(
            report.output(),
            Some("https://example.com/page#section:~:text=linked%20URL,-'s%20format")
        );
    }

    #[test]
    fn test_url_without_directive() {
        let config = Config {
            append: vec!["text=start".to_string()],
            ..Default::default()
        };
        let report = process("https://example.com/#top", &edits(config));

        assert_eq!(report.output(), Some("https://example.com/#top:~:text=start"));
    }

    #[test]
    fn test_strict_and_lenient() {
        let input = "#:~:text=start&unknownDirective&note=x";

        let report = process(input, &Edits::default());
        assert!(!report.is_ok());
        assert_eq!(report.output(), None);
        assert!(report.error.unwrap().contains("unknownDirective"));

        let config = Config {
            lenient: true,
            ..Default::default()
        };
        let report = process(input, &edits(config));
        assert_eq!(report.output(), Some("#:~:text=start&note=x"));
    }

    #[test]
    fn test_edits() {
        let config = Config {
            remove: vec![0],
            append: vec!["other=y".to_string(), "text=appended".to_string()],
            text_only: true,
            ..Default::default()
        };
        let report = process(":~:text=first&note=x&text=second", &edits(config));

        assert_eq!(report.output(), Some("#:~:text=second&text=appended"));
    }

    #[test]
    fn test_directive_name_with_colon_is_not_a_url() {
        let config = Config {
            text_only: true,
            ..Default::default()
        };
        let report = process("ns:key=v&text=a", &edits(config));

        assert!(report.is_ok());
        assert_eq!(report.output(), Some("#:~:text=a"));
        assert_eq!(report.directives.len(), 1);

        let report = process("ns:key=v&text=a", &Edits::default());
        assert_eq!(report.output(), Some("#:~:ns:key=v&text=a"));
        assert_eq!(report.directives.len(), 2);
    }

    #[test]
    fn test_opaque_url_with_fragment() {
        let report = process("urn:isbn:123#:~:text=start", &Edits::default());
        assert_eq!(report.output(), Some("urn:isbn:123#:~:text=start"));
    }

    #[test]
    fn test_invalid_append() {
        let config = Config {
            append: vec!["foobar".to_string()],
            ..Default::default()
        };
        assert!(Edits::from_config(&config).is_err());
    }
}
