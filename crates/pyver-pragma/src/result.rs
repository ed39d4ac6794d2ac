//! Result and error types for pyver-pragma.

use thiserror::Error;

/// Result type for pattern generation
pub type PragmaResult<T> = Result<T, PragmaError>;

/// Errors that can occur while generating exclusion patterns
#[derive(Debug, Error)]
pub enum PragmaError {
    /// The major version is not the supported family
    #[error("Unsupported Python version family {major}.x (only 3.x is supported)")]
    UnsupportedVersionFamily {
        /// Major version that was supplied
        major: u32,
    },

    /// A version string or sequence could not be normalized
    #[error("Invalid version '{input}': {message}")]
    InvalidVersion {
        /// The offending input
        input: String,
        /// Error message
        message: String,
    },

    /// A plugin option had a value that could not be used
    #[error("Invalid plugin option '{key}': {message}")]
    InvalidOption {
        /// Option key
        key: String,
        /// Error message
        message: String,
    },

    /// Compiling a generated pattern failed
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl PragmaError {
    /// Create an invalid version error
    #[must_use]
    pub fn invalid_version(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create an invalid option error
    #[must_use]
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports an unsupported major version
    #[must_use]
    pub const fn is_unsupported_family(&self) -> bool {
        matches!(self, Self::UnsupportedVersionFamily { .. })
    }
}
