//! Command handlers
//!
//! Each handler resolves what it needs, then writes its report to the given
//! writer so it can be exercised without a terminal.

pub mod classify;
pub mod detect;
pub mod generate;

pub use classify::{execute_classify, read_source};
pub use detect::execute_detect;
pub use generate::execute_generate;

use crate::commands::EnvArgs;
use crate::config::{load_settings, resolve};
use crate::detect::Detector;
use crate::error::CliResult;
use pyver_pragma::PatternSet;

/// Resolve the environment for `args` and generate its pattern set
pub fn pattern_set(args: &EnvArgs, detector: &dyn Detector) -> CliResult<PatternSet> {
    let settings = load_settings(args)?;
    let (environment, bounds) = resolve(args, &settings, detector)?;
    tracing::debug!(environment = %environment, max_minor = bounds.max_minor, "generating patterns");
    Ok(PatternSet::new(environment, &bounds)?)
}
