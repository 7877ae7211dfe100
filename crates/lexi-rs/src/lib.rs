//! Public SDK surface for Lexi.
//!
//! This crate re-exports the building blocks and provides the wiring helpers
//! shared by the `lexi` binary and embedders: config loading, store and
//! cache construction, and plain-text rendering for headless output.

mod render;
mod setup;

/// Re-export for convenience.
pub use lexi_rs_config as config;
pub use lexi_rs_core as core;
/// Re-export for convenience.
pub use lexi_rs_store as store;
pub use lexi_rs_tui as tui;

pub use render::{entry_lines, format_timestamp, table_lines};
pub use setup::{SetupError, build_cache, build_list, build_store, load_config};

/// Initialize logging with `env_logger`.
///
/// Safe to call more than once; later calls are ignored. Output goes to
/// stderr and is filtered by `RUST_LOG` (errors only when unset).
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Error)
        .parse_default_env()
        .try_init();
}
