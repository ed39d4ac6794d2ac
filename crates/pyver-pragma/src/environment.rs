//! The runtime environment annotations are evaluated against.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpreter version, platform and implementation
///
/// Platform and implementation are opaque: they are only compared against
/// `!<name>` negation markers, never normalized.
///
/// # Example
/// ```
/// use pyver_pragma::{Environment, Version};
///
/// let env = Environment::new((3, 8), "Linux", "CPython");
/// assert_eq!(env.version, Version::new(3, 8));
/// assert_eq!(env.to_string(), "CPython 3.8.0 on Linux");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    /// Interpreter version
    pub version: Version,
    /// Platform name as reported by `platform.system()`
    pub platform: String,
    /// Implementation name as reported by `platform.python_implementation()`
    pub implementation: String,
}

impl Environment {
    /// Create an environment descriptor
    #[must_use]
    pub fn new(
        version: impl Into<Version>,
        platform: impl Into<String>,
        implementation: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            platform: platform.into(),
            implementation: implementation.into(),
        }
    }

    /// Replace the platform name
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Replace the implementation name
    #[must_use]
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {}",
            self.implementation, self.version, self.platform
        )
    }
}
