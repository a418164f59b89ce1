//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr through `tracing-subscriber`, filtered by the
//! `TERMCHAT_LOG` variable (e.g. `TERMCHAT_LOG=termchat=debug`). The default
//! is `warn`, which keeps the chat screen clean.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::constants::LOG_ENV_VAR;

/// Installs the global subscriber. Safe to call once at startup.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
