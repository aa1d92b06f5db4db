//! Logger setup for hosts and the headless runner.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install `env_logger` as the global logger.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug over info.
/// Calling it twice is harmless.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.to_string()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}
