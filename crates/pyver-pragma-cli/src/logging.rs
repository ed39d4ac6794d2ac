//! Log subscriber setup

use crate::config::CliConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a log filter, e.g. `pyver_pragma=debug`
pub const LOG_ENV: &str = "PYVER_PRAGMA_LOG";

/// Build the log filter: `PYVER_PRAGMA_LOG` when set, else the verbosity default
#[must_use]
pub fn filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_directive()))
}

/// Install the global subscriber, writing to stderr.
///
/// A second call is a no-op.
pub fn init(config: &CliConfig) {
    let _ = fmt()
        .with_env_filter(filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .try_init();
}
