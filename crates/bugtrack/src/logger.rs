//! Logging set-up for the binary
//!
//! Output goes to stderr so stdout only carries the rendered bug list.
//! The level comes from `RUST_LOG`, defaulting to `info` (`debug` when
//! verbose).

use env_logger::{Builder, Env, Target};

/// Initialize the global logger
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder.target(Target::Stderr).format_timestamp_millis();
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
