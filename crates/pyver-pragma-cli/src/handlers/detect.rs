//! Detect command handler

use crate::commands::DetectArgs;
use crate::detect::Detector;
use crate::error::CliResult;
use crate::output::render_environment;
use std::io::Write;

/// Execute the detect command
pub fn execute_detect(
    args: &DetectArgs,
    detector: &dyn Detector,
    out: &mut impl Write,
) -> CliResult<()> {
    let environment = detector.detect()?;
    out.write_all(render_environment(&environment, args.json)?.as_bytes())?;
    Ok(())
}
