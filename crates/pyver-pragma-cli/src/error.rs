//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Interpreter detection failed
    #[error("Could not detect environment from '{program}': {message}")]
    Detection {
        /// Interpreter that was run
        program: String,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pattern generation error
    #[error("{0}")]
    Pragma(#[from] pyver_pragma::PragmaError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML settings error
    #[error("Settings error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a detection error
    #[must_use]
    pub fn detection(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Detection {
            program: program.into(),
            message: message.into(),
        }
    }
}
