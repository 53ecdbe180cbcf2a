use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

use crate::verbosity::Verbosity;

/// Initialize the logging system with the given verbosity level.
///
/// Log records go to stderr as `[LEVEL] message` so that stdout only carries
/// the normalized output.
pub(crate) fn init_logging(verbose: &Verbosity) {
    // RUST_LOG takes precedence over the command line
    let env = Env::default().filter_or("RUST_LOG", "warn");

    let mut builder = Builder::from_env(env);
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if std::env::var("RUST_LOG").is_err() {
        builder.filter_level(LevelFilter::Warn);
        builder
            .filter_module("fragdir", verbose.log_level_filter())
            .filter_module("fragdir_lib", verbose.log_level_filter());
    }

    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder.init();
}
