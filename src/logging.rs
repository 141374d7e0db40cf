//! Logger setup.
//!
//! Diagnostics go through the `log` facade to stderr via `env_logger`. The default
//! filter is `warn` so regular output (summary, preview, confirmation) stays clean;
//! `RUST_LOG=info` or `RUST_LOG=debug` shows pipeline steps.

use env_logger::Env;

/// Initialise the global logger. Calling it again is a no-op.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn")).try_init();
}
