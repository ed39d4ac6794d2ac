//! pyver-pragma CLI library
//!
//! Command-line front end for generating and checking version-conditioned
//! `pragma: no cover` exclusion patterns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
pub mod detect;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    ClassifyArgs, ClassifyFormat, Cli, ColorArg, Commands, DetectArgs, EnvArgs, GenerateArgs,
    GenerateFormat, SetArg,
};
pub use config::{load_settings, resolve, CliConfig, ColorChoice, Settings, Verbosity};
pub use detect::{parse_probe, Detector, InterpreterDetector};
pub use error::{CliError, CliResult};
pub use output::{render_annotations, render_environment, render_patterns};
