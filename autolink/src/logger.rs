//! Logging setup for the autolink CLI.
//!
//! `RUST_LOG` is honoured unless an explicit level is passed, in which case
//! that level applies to the autolink crates and warnings stay on for the rest.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises the global logger. Calling it more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder
            .filter_level(LevelFilter::Warn.min(level))
            .filter_module("autolink", level)
            .filter_module("autolink_core", level);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}
