//! stderr logging for the CLI.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Start logging. `RUST_LOG` wins over the `--verbose` default.
/// The returned handle must stay alive for the rest of `main`.
pub fn init(verbose: bool) -> Result<LoggerHandle> {
    let level = if verbose { "debug" } else { "warn" };

    Logger::try_with_env_or_str(level)
        .context("Invalid log specification")?
        .log_to_stderr()
        .format(flexi_logger::colored_default_format)
        .start()
        .context("Could not start logger")
}
