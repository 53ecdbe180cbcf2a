//! `fragdir` inspects and normalizes URL fragment directives, the part of a
//! URL fragment after `:~:` such as `#:~:text=start,end`.
//!
//! The fragdir binary is a wrapper around fragdir-lib, which provides the
//! parser and the directive types.
//!
//! Normalize the directives of a URL:
//! ```sh
//! fragdir "https://example.com/#:~:text=linked%20URL,-'s%20format"
//! ```
//!
//! Normalize a bare fragment directive:
//! ```sh
//! fragdir ":~:text=with-,repeated, For, -instance&note=x"
//! ```
//!
//! Skip malformed directives and keep only text directives:
//! ```sh
//! fragdir --lenient --text-only "#:~:text=start&unknownDirective&note=x"
//! ```
//!
//! Read inputs from stdin and print a JSON report:
//! ```sh
//! cat urls.txt | fragdir --format json -
//! ```
#![warn(clippy::all, clippy::pedantic)]
#![warn(
    absolute_paths_not_starting_with_crate,
    rustdoc::invalid_html_tags,
    missing_copy_implementations,
    missing_debug_implementations,
    semicolon_in_expressions_from_macros,
    unreachable_pub,
    unused_extern_crates,
    variant_size_differences,
    clippy::missing_const_for_fn
)]
#![deny(anonymous_parameters, macro_use_extern_crate)]
#![deny(missing_docs)]

use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Error, Result};
use clap::{Parser, crate_version};
use log::{error, info};

mod formatters;
mod options;
mod process;
mod verbosity;

use crate::{
    formatters::{get_report_formatter, log::init_logging},
    options::{Config, FRAGDIR_CONFIG_FILE, FragdirOptions},
    process::{Edits, process},
    verbosity::Verbosity,
};

/// A C-like enum that can be cast to `i32` and used as process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    // NOTE: exit code 1 is used for any `Result::Err` bubbled up to `main()`
    // using the `?` operator, e.g. an invalid `--append` directive.
    #[allow(unused)]
    UnexpectedFailure = 1,
    MalformedInput = 2,
    ConfigFile = 3,
}

fn main() -> Result<()> {
    // std::process::exit doesn't guarantee that all destructors will be run,
    // therefore we wrap the main code in another function to ensure that.
    // See: https://doc.rust-lang.org/stable/std/process/fn.exit.html
    let exit_code = run_main()?;
    std::process::exit(exit_code);
}

/// Load the given config file, or `fragdir.toml` from the current directory
/// if it exists and no file was given.
fn read_config_file(config_file: Option<&Path>) -> Result<Option<Config>> {
    if let Some(config_file) = config_file {
        return Config::load_from_file(config_file)
            .map(Some)
            .with_context(|| {
                format!("Cannot load configuration file `{}`", config_file.display())
            });
    }

    // A missing default config file is fine, an invalid one is not
    let default_config = PathBuf::from(FRAGDIR_CONFIG_FILE);
    if !default_config.is_file() {
        return Ok(None);
    }
    Config::load_from_file(&default_config)
        .map(Some)
        .with_context(|| {
            format!(
                "Cannot load default configuration file `{}`",
                default_config.display()
            )
        })
}

/// Merge all provided config options into one.
/// This includes a potential config file, command-line- and environment variables
fn load_config() -> Result<FragdirOptions> {
    let mut opts = FragdirOptions::parse();

    if let Some(config) = read_config_file(opts.config_file.as_deref())? {
        opts.config.merge(config);
    }

    Ok(opts)
}

/// Load the configuration, set up logging and run fragdir
fn run_main() -> Result<i32> {
    use std::process::exit;

    let opts = match load_config() {
        Ok(opts) => opts,
        Err(e) => {
            init_logging(&Verbosity::default());
            error!(
                "Error while loading config: {e:#}\n\
                fragdir v{} expects a TOML file with the same keys as the long command-line options",
                crate_version!()
            );
            exit(ExitCode::ConfigFile as i32);
        }
    };

    // The config file may set the verbosity, so logging starts after the merge
    init_logging(&opts.config.verbose);

    match run(&opts) {
        Err(e) if Some(ErrorKind::BrokenPipe) == underlying_io_error_kind(&e) => {
            exit(ExitCode::Success as i32);
        }
        res => res,
    }
}

/// Check if the given error can be traced back to an `io::ErrorKind`
/// This is helpful for troubleshooting the root cause of an error.
/// Code is taken from the anyhow documentation.
fn underlying_io_error_kind(error: &Error) -> Option<io::ErrorKind> {
    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            return Some(io_error.kind());
        }
    }
    None
}

/// Run fragdir on the given inputs
fn run(opts: &FragdirOptions) -> Result<i32> {
    let inputs = opts.inputs()?;
    let edits = Edits::from_config(&opts.config)?;

    let reports: Vec<_> = inputs.iter().map(|input| process(input, &edits)).collect();
    let failed = reports.iter().filter(|report| !report.is_ok()).count();

    let formatter = get_report_formatter(opts.config.format);
    let output = formatter.format(&reports)?;
    io::stdout().lock().write_all(output.as_bytes())?;

    if failed > 0 {
        info!("{failed} of {} input(s) could not be parsed", reports.len());
        return Ok(ExitCode::MalformedInput as i32);
    }
    Ok(ExitCode::Success as i32)
}
