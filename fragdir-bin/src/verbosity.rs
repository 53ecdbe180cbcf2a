//! `-v`/`-q` flags for controlling log output, in the style of
//! `clap-verbosity-flag`.
//!
//! Errors and informational messages are shown by default.
//! - `-q` shows only warnings and errors, `-qq` only errors
//! - `-v` adds debug output, `-vv` trace output
//!
//! The level can also be set in the configuration file as `verbose = "debug"`.

use std::fmt;

use log::{Level, LevelFilter};
use serde::Deserialize;

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Verbosity {
    /// More output per occurrence
    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet",
    )]
    verbose: u8,

    /// Less output per occurrence
    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "verbose",
    )]
    quiet: u8,
}

impl Verbosity {
    pub(crate) const fn log_level(&self) -> Level {
        level_enum(self.verbosity())
    }

    pub(crate) fn log_level_filter(&self) -> LevelFilter {
        self.log_level().to_level_filter()
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn verbosity(&self) -> i8 {
        level_value(Level::Info) - (self.quiet as i8) + (self.verbose as i8)
    }
}

// Deserialize from a level name such as "warn", "warning" or "Debug"
impl<'de> Deserialize<'de> for Verbosity {
    #[allow(clippy::cast_sign_loss)]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let level = match s.to_lowercase().as_str() {
            "error" => Level::Error,
            "warn" | "warning" => Level::Warn,
            "info" => Level::Info,
            "debug" => Level::Debug,
            "trace" => Level::Trace,
            level => {
                return Err(serde::de::Error::custom(format!(
                    "invalid log level `{level}`"
                )));
            }
        };

        let offset = level_value(level) - level_value(Level::Info);
        Ok(Verbosity {
            verbose: offset.max(0) as u8,
            quiet: (-offset).max(0) as u8,
        })
    }
}

const fn level_value(level: Level) -> i8 {
    match level {
        Level::Error => 0,
        Level::Warn => 1,
        Level::Info => 2,
        Level::Debug => 3,
        Level::Trace => 4,
    }
}

const fn level_enum(verbosity: i8) -> Level {
    match verbosity {
        i8::MIN..=0 => Level::Error,
        1 => Level::Warn,
        2 => Level::Info,
        3 => Level::Debug,
        _ => Level::Trace,
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log_level())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        verbose: Verbosity,
    }

    #[test]
    fn verify_app() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(Verbosity::default().log_level(), Level::Info);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["fragdir", "-vv"]);
        assert_eq!(cli.verbose.log_level(), Level::Trace);

        let cli = Cli::parse_from(["fragdir", "-q"]);
        assert_eq!(cli.verbose.log_level(), Level::Warn);

        let cli = Cli::parse_from(["fragdir", "-qqqq"]);
        assert_eq!(cli.verbose.log_level(), Level::Error);
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Config {
            verbose: Verbosity,
        }

        for (name, level) in [
            ("error", Level::Error),
            ("Warning", Level::Warn),
            ("info", Level::Info),
            ("debug", Level::Debug),
            ("trace", Level::Trace),
        ] {
            let config: Config = toml::from_str(&format!("verbose = \"{name}\"")).unwrap();
            assert_eq!(config.verbose.log_level(), level);
        }

        assert!(toml::from_str::<Config>("verbose = \"loud\"").is_err());
    }
}
