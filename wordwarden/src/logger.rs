// wordwarden/src/logger.rs
//! Logger bootstrap for the CLI.
//!
//! Honors `RUST_LOG` when no explicit level is forced by a flag.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger. A `Some` level (from `--quiet` or
/// `--debug`) overrides whatever `RUST_LOG` says.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("info")),
    };
    let _ = builder.format_timestamp(None).try_init();
}
