//! Logger setup for the CLI.
//!
//! Logs go to stderr so they never mix with command output. `RUST_LOG`
//! overrides the level chosen by `-v`.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Start logging. The returned handle must be kept alive for the whole run.
pub fn init(verbosity: u8) -> Result<LoggerHandle> {
    Logger::try_with_env_or_str(level_for(verbosity))
        .context("Invalid log specification")?
        .log_to_stderr()
        .start()
        .context("Failed to start logger")
}
