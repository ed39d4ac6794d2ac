//! Generate command handler

use super::pattern_set;
use crate::commands::GenerateArgs;
use crate::detect::Detector;
use crate::error::CliResult;
use crate::output::render_patterns;
use std::io::Write;

/// Execute the generate command
pub fn execute_generate(
    args: &GenerateArgs,
    detector: &dyn Detector,
    out: &mut impl Write,
) -> CliResult<()> {
    let set = pattern_set(&args.env, detector)?;
    out.write_all(render_patterns(&set, args.set, args.format)?.as_bytes())?;
    Ok(())
}
