//! Logger set-up
//!
//! Diagnostics go to stderr through `env_logger`; command output never does.

use log::{debug, LevelFilter};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// `level` is the base filter. `RUST_LOG`, when set, is applied on top of it
/// so individual modules can still be tuned. Only the first call has any
/// effect.
pub fn init_logger(level: LevelFilter) {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        debug!("Logging initialized at level {}", level);
    });
}
