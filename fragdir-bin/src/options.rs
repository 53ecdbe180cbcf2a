use crate::verbosity::Verbosity;
use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use const_format::formatcp;
use serde::Deserialize;
use std::io::{self, BufRead};
use std::{fs, path::Path, path::PathBuf};
use strum::{Display, EnumString, VariantNames};

pub(crate) const FRAGDIR_CONFIG_FILE: &str = "fragdir.toml";

/// Input which stands for "read inputs from stdin, one per line"
pub(crate) const STDIN_INPUT: &str = "-";

// We use a custom help message here because we want to show the default
// value of the config file, but also be able to check if the user has
// provided a custom value. If they didn't, we won't throw an error if
// the file doesn't exist.
const HELP_MSG_CONFIG_FILE: &str = formatcp!(
    "Configuration file to use\n\n[default: {}]",
    FRAGDIR_CONFIG_FILE,
);

/// The format used to print the results
#[derive(
    Debug, Deserialize, Default, Clone, Copy, Display, EnumString, VariantNames, PartialEq, Eq,
)]
#[non_exhaustive]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    /// One normalized URL or `#:~:` fragment per line
    #[default]
    Plain,
    /// A JSON array with one report per input
    Json,
    /// A Markdown section and directive table per input
    Markdown,
}

// Macro for merging configuration values
macro_rules! fold_in {
    ($cli:ident , $toml:ident ; $ty:ident { $( $key:ident : $default:expr, )* } ) => {
        if (false) {
            #[allow(dead_code, unused, clippy::diverging_sub_expression)]
            let _check_fold_in_exhaustivity = $ty {
                $($key: unreachable!(), )*
            };
        };
        $(
            if $cli.$key == $default && $toml.$key != $default {
                $cli.$key = $toml.$key;
            }
        )*
    };
}

/// fragdir parses the fragment directives (`#:~:text=...`) of URLs, prints
/// them in canonical form and optionally edits them.
///
/// fragdir is powered by fragdir-lib, the Rust library for fragment directives.
#[derive(Parser, Debug)]
#[command(version, about, next_display_order = None)]
pub(crate) struct FragdirOptions {
    /// Inputs to normalize
    #[arg(
        name = "inputs",
        required = true,
        long_help = "Inputs to normalize. These can be:
absolute URLs (e.g. `https://example.com/#:~:text=start`), bare fragment
directives (e.g. `#:~:text=start`, `:~:text=start&note=x` or `text=start`),
or standard input (`-`) with one input per line.

NOTE: Use `--` to separate inputs from options that allow multiple arguments."
    )]
    raw_inputs: Vec<String>,

    /// Configuration file to use
    #[arg(short, long = "config")]
    #[arg(help = HELP_MSG_CONFIG_FILE)]
    pub(crate) config_file: Option<PathBuf>,

    #[clap(flatten)]
    pub(crate) config: Config,
}

impl FragdirOptions {
    /// Get the inputs, reading standard input in place of `-`.
    /// Blank lines on standard input are ignored.
    pub(crate) fn inputs(&self) -> Result<Vec<String>> {
        let mut inputs = Vec::with_capacity(self.raw_inputs.len());

        for raw_input in &self.raw_inputs {
            if raw_input != STDIN_INPUT {
                inputs.push(raw_input.clone());
                continue;
            }

            for line in io::stdin().lock().lines() {
                let line = line.context("Cannot read inputs from stdin")?;
                let line = line.trim();
                if !line.is_empty() {
                    inputs.push(line.to_owned());
                }
            }
        }

        Ok(inputs)
    }
}

/// The main configuration for fragdir
#[derive(Parser, Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Verbose program output
    #[clap(flatten)]
    #[serde(default)]
    pub(crate) verbose: Verbosity,

    /// Output format
    #[arg(short, long, default_value = "plain", value_parser = PossibleValuesParser::new(OutputFormat::VARIANTS).map(|s| s.parse::<OutputFormat>().unwrap()))]
    #[serde(default)]
    pub(crate) format: OutputFormat,

    /// Skip malformed directives instead of rejecting the whole input
    #[arg(short, long)]
    #[serde(default)]
    pub(crate) lenient: bool,

    /// Only keep text directives
    #[arg(short, long)]
    #[serde(default)]
    pub(crate) text_only: bool,

    /// Remove the directives at these zero-based positions.
    /// Positions refer to the parsed input; out-of-range positions are ignored.
    #[arg(
        short,
        long,
        value_name = "INDEX",
        value_delimiter = ',',
        verbatim_doc_comment
    )]
    #[serde(default)]
    pub(crate) remove: Vec<usize>,

    /// Append a directive to every input, e.g. `text=start,end` or `note=x`.
    /// Can be given multiple times; directives keep their order.
    #[arg(short, long, value_name = "DIRECTIVE", verbatim_doc_comment)]
    #[serde(default)]
    pub(crate) append: Vec<String>,
}

impl Config {
    /// Load configuration from a file
    pub(crate) fn load_from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).with_context(|| "Failed to parse configuration file")
    }

    /// Merge the configuration from TOML into the CLI configuration.
    /// Values given on the command line win.
    pub(crate) fn merge(&mut self, toml: Config) {
        // NOTE: if you see an error within this macro call, check to make sure that
        // that the fields provided to fold_in! match all the fields of the Config struct.
        fold_in! {
            // Destination and source configs
            self, toml;

            Config {
                verbose: Verbosity::default(),
                format: OutputFormat::default(),
                lenient: false,
                text_only: false,
                remove: Vec::<usize>::new(),
                append: Vec::<String>::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use pretty_assertions::assert_eq;

    #[test]
    fn verify_app() {
        use clap::CommandFactory;
        FragdirOptions::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let opts = FragdirOptions::parse_from([
            "fragdir",
            "--format",
            "json",
            "--remove",
            "0,2",
            "--append",
            "text=start",
            "--append",
            "note=x",
            "--text-only",
            ":~:text=a",
        ]);

        assert_eq!(opts.raw_inputs, vec![":~:text=a"]);
        assert_eq!(opts.config.format, OutputFormat::Json);
        assert_eq!(opts.config.remove, vec![0, 2]);
        assert_eq!(opts.config.append, vec!["text=start", "note=x"]);
        assert!(opts.config.text_only);
        assert!(!opts.config.lenient);
    }

    #[test]
    fn test_load_config() {
        let toml = r#"
            verbose = "debug"
            format = "markdown"
            lenient = true
            remove = [1]
            append = ["note=x"]
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.verbose.log_level(), Level::Debug);
        assert_eq!(config.format, OutputFormat::Markdown);
        assert!(config.lenient);
        assert_eq!(config.remove, vec![1]);

        assert!(toml::from_str::<Config>("unknown = true").is_err());
    }

    #[test]
    fn test_merge_prefers_cli() {
        let toml = Config {
            format: OutputFormat::Json,
            lenient: true,
            append: vec!["note=x".to_string()],
            ..Default::default()
        };
        let mut cli = Config {
            format: OutputFormat::Markdown,
            ..Default::default()
        };
        cli.merge(toml);

        assert_eq!(cli.format, OutputFormat::Markdown);
        assert!(cli.lenient);
        assert_eq!(cli.append, vec!["note=x"]);
        assert!(cli.remove.is_empty());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
