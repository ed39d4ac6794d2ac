//! Environment detection by running a Python interpreter

use crate::error::{CliError, CliResult};
use pyver_pragma::{Environment, PragmaError, Version};
use serde::Deserialize;
use std::process::Command;

/// Probe printed by the interpreter as a single JSON object
const PROBE: &str = "import json, platform, sys; \
print(json.dumps({'version_info': list(sys.version_info), \
'platform': platform.system(), \
'implementation': platform.python_implementation()}))";

/// Source of the runtime environment
pub trait Detector {
    /// Report the environment
    fn detect(&self) -> CliResult<Environment>;
}

/// Runs an interpreter and reads the probe output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterDetector {
    program: String,
}

impl InterpreterDetector {
    /// Detect through `program`, e.g. `python3`
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Interpreter that will be run
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Detector for InterpreterDetector {
    fn detect(&self) -> CliResult<Environment> {
        tracing::debug!(program = %self.program, "probing interpreter");
        let output = Command::new(&self.program)
            .args(["-c", PROBE])
            .output()
            .map_err(|e| CliError::detection(&self.program, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CliError::detection(
                &self.program,
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe(&stdout).map_err(|e| CliError::detection(&self.program, e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Probe {
    version_info: Vec<serde_json::Value>,
    platform: String,
    implementation: String,
}

/// Parse the probe's JSON output into an environment.
///
/// `version_info` is `[major, minor, micro, releaselevel, serial]`; only the
/// first two entries are required.
pub fn parse_probe(text: &str) -> CliResult<Environment> {
    let probe: Probe = serde_json::from_str(text.trim())?;
    let number = |idx: usize| -> Option<u32> {
        probe
            .version_info
            .get(idx)
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    };

    let (Some(major), Some(minor)) = (number(0), number(1)) else {
        return Err(PragmaError::invalid_version(
            format!("{:?}", probe.version_info),
            "expected numeric major and minor",
        )
        .into());
    };

    let mut version = Version::new(major, minor).with_micro(number(2).unwrap_or(0));
    match probe.version_info.get(3).and_then(serde_json::Value::as_str) {
        Some(level) if level != "final" => {
            version = version.with_release(level, number(4).unwrap_or(0));
        }
        _ => {}
    }

    Ok(Environment::new(
        version,
        probe.platform,
        probe.implementation,
    ))
}
