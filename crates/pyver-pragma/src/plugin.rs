//! Host-facing adapter for a coverage tool's exclusion list.
//!
//! The host hands its configuration to each registered [`Configurer`] once at
//! startup. [`PyVerPragmaPlugin`] swaps the built-in `pragma: no cover` rule
//! for the version-aware match and non-match sets.

use crate::classify::PatternSet;
use crate::environment::Environment;
use crate::pattern::{LITERAL_TRIGGER, TRIGGER};
use crate::result::{PragmaError, PragmaResult};
use crate::version::VersionBounds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default partial-branch rule of the host
pub const DEFAULT_PARTIAL: &str = r"(?i)#\s*pragma[:\s]?\s*no\s*branch";

/// Options handed to [`coverage_init`] from the host's plugin section
pub type PluginOptions = BTreeMap<String, String>;

/// The host's configuration object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Regexes marking lines excluded from coverage
    pub exclude_list: Vec<String>,
    /// Regexes marking branches allowed to be partial
    pub partial_list: Vec<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            exclude_list: vec![TRIGGER.to_string()],
            partial_list: vec![DEFAULT_PARTIAL.to_string()],
        }
    }
}

impl CoverageConfig {
    /// Create the host defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the exclusion list
    #[must_use]
    pub fn with_exclude_list(mut self, exclude_list: Vec<String>) -> Self {
        self.exclude_list = exclude_list;
        self
    }
}

/// Host object wrapping a [`CoverageConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    /// The wrapped configuration
    pub config: CoverageConfig,
}

impl Coverage {
    /// Wrap a configuration
    #[must_use]
    pub const fn new(config: CoverageConfig) -> Self {
        Self { config }
    }
}

/// Anything that leads to a [`CoverageConfig`], directly or through `.config`
pub trait ConfigHandle {
    /// Mutable access to the configuration
    fn config_mut(&mut self) -> &mut CoverageConfig;
}

impl ConfigHandle for CoverageConfig {
    fn config_mut(&mut self) -> &mut CoverageConfig {
        self
    }
}

impl ConfigHandle for Coverage {
    fn config_mut(&mut self) -> &mut CoverageConfig {
        &mut self.config
    }
}

/// A plugin that adjusts the host configuration at startup
pub trait Configurer: fmt::Debug + Send + Sync {
    /// Plugin name for diagnostics
    fn name(&self) -> &str;

    /// Mutate the configuration in place
    fn configure(&self, config: &mut CoverageConfig) -> PragmaResult<()>;
}

/// Replaces the unconditional `pragma: no cover` rule with version-aware rules
///
/// # Example
/// ```
/// use pyver_pragma::{CoverageConfig, Environment, PyVerPragmaPlugin};
///
/// let mut config = CoverageConfig::new();
/// let plugin = PyVerPragmaPlugin::new(Environment::new((3, 8), "Linux", "CPython"));
/// plugin.configure_host(&mut config).unwrap();
/// assert_eq!(config.exclude_list.len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyVerPragmaPlugin {
    environment: Environment,
    bounds: VersionBounds,
}

impl PyVerPragmaPlugin {
    /// Plugin name as registered with the host
    pub const NAME: &'static str = "pyver_pragma";

    /// Create a plugin for `environment` with default bounds
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            bounds: VersionBounds::default(),
        }
    }

    /// Set the version bounds
    #[must_use]
    pub const fn with_bounds(mut self, bounds: VersionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Create a plugin, applying `max_minor`, `platform` and
    /// `implementation` overrides from `options`
    pub fn from_options(environment: Environment, options: &PluginOptions) -> PragmaResult<Self> {
        let mut environment = environment;
        let mut bounds = VersionBounds::default();
        for (key, value) in options {
            match key.as_str() {
                "max_minor" => {
                    let max_minor = value.trim().parse::<u32>().map_err(|_| {
                        PragmaError::invalid_option(key, format!("'{value}' is not an integer"))
                    })?;
                    bounds = bounds.with_max_minor(max_minor);
                }
                "platform" => environment = environment.with_platform(value.trim()),
                "implementation" => environment = environment.with_implementation(value.trim()),
                _ => tracing::warn!(option = %key, "ignoring unknown plugin option"),
            }
        }
        Ok(Self {
            environment,
            bounds,
        })
    }

    /// Environment the plugin generates patterns for
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Configure a host reached directly or through its `.config`
    pub fn configure_host<H: ConfigHandle + ?Sized>(&self, host: &mut H) -> PragmaResult<()> {
        self.configure(host.config_mut())
    }
}

impl Configurer for PyVerPragmaPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configure(&self, config: &mut CoverageConfig) -> PragmaResult<()> {
        // Generate first so a failure leaves the host untouched
        let set = PatternSet::new(self.environment.clone(), &self.bounds)?;

        let before = config.exclude_list.len();
        config
            .exclude_list
            .retain(|p| p != TRIGGER && p != LITERAL_TRIGGER);
        let removed = before - config.exclude_list.len();

        config.exclude_list.extend(set.sources());

        tracing::info!(
            environment = %self.environment,
            removed,
            added = set.matches().len() + set.non_matches().len(),
            "configured exclusion list"
        );
        Ok(())
    }
}

/// Configurers registered by plugins
#[derive(Debug, Default)]
pub struct PluginRegistry {
    configurers: Vec<Box<dyn Configurer>>,
}

impl PluginRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configurer
    pub fn add_configurer(&mut self, configurer: impl Configurer + 'static) {
        self.configurers.push(Box::new(configurer));
    }

    /// Names of the registered configurers, in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.configurers.iter().map(|c| c.name()).collect()
    }

    /// Number of registered configurers
    #[must_use]
    pub fn len(&self) -> usize {
        self.configurers.len()
    }

    /// Whether no configurer is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configurers.is_empty()
    }

    /// Run every configurer against `host`, stopping at the first error
    pub fn configure<H: ConfigHandle + ?Sized>(&self, host: &mut H) -> PragmaResult<()> {
        let config = host.config_mut();
        for configurer in &self.configurers {
            configurer.configure(config)?;
        }
        Ok(())
    }
}

/// Plugin entry point: register [`PyVerPragmaPlugin`] for `environment`
pub fn coverage_init(
    registry: &mut PluginRegistry,
    environment: Environment,
    options: &PluginOptions,
) -> PragmaResult<()> {
    let plugin = PyVerPragmaPlugin::from_options(environment, options)?;
    registry.add_configurer(plugin);
    Ok(())
}
