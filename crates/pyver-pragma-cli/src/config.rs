//! CLI configuration and environment resolution

use crate::commands::EnvArgs;
use crate::detect::Detector;
use crate::error::{CliError, CliResult};
use pyver_pragma::{Environment, Version, VersionBounds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter directive for this level
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Settings read from a YAML file
///
/// ```yaml
/// python: "3.8"
/// platform: Linux
/// implementation: CPython
/// max_minor: 15
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Python version, `MAJOR.MINOR[.MICRO]`
    pub python: Option<String>,
    /// Platform name
    pub platform: Option<String>,
    /// Implementation name
    pub implementation: Option<String>,
    /// Highest minor version covered by `<` and `<=` qualifiers
    pub max_minor: Option<u32>,
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }
}

/// Resolve the environment and bounds from flags, settings and detection.
///
/// Flags (and their environment variables) win over the settings file; the
/// interpreter is only run when something is still missing.
pub fn resolve(
    args: &EnvArgs,
    settings: &Settings,
    detector: &dyn Detector,
) -> CliResult<(Environment, VersionBounds)> {
    let version = match (&args.python, &settings.python) {
        (Some(v), _) => Some(v.clone()),
        (None, Some(text)) => Some(text.parse::<Version>()?),
        (None, None) => None,
    };
    let platform = args.platform.clone().or_else(|| settings.platform.clone());
    let implementation = args
        .implementation
        .clone()
        .or_else(|| settings.implementation.clone());

    let environment = match (version, platform, implementation) {
        (Some(version), Some(platform), Some(implementation)) => {
            Environment::new(version, platform, implementation)
        }
        (version, platform, implementation) => {
            let detected = detector.detect()?;
            tracing::info!(environment = %detected, "detected environment");
            Environment {
                version: version.unwrap_or(detected.version),
                platform: platform.unwrap_or(detected.platform),
                implementation: implementation.unwrap_or(detected.implementation),
            }
        }
    };

    let mut bounds = VersionBounds::default();
    if let Some(max_minor) = args.max_minor.or(settings.max_minor) {
        bounds = bounds.with_max_minor(max_minor);
    }
    Ok((environment, bounds))
}

/// Load the settings file named in `args`, if any
pub fn load_settings(args: &EnvArgs) -> CliResult<Settings> {
    args.config
        .as_deref()
        .map_or_else(|| Ok(Settings::default()), Settings::load)
}
