//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use pyver_pragma::Version;
use std::path::PathBuf;

/// pyver-pragma: version-conditioned `pragma: no cover` for coverage tools
#[derive(Parser, Debug)]
#[command(name = "pyver-pragma")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the exclusion patterns for an environment
    Generate(GenerateArgs),

    /// Classify annotated lines against an environment
    Classify(ClassifyArgs),

    /// Detect the environment from a Python interpreter
    Detect(DetectArgs),
}

/// Environment selection shared by every subcommand
///
/// Anything not given here or in the settings file is detected by running
/// the interpreter.
#[derive(Args, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Python version, e.g. 3.8
    #[arg(long, env = "PYVER_PRAGMA_PYTHON")]
    pub python: Option<Version>,

    /// Platform name as reported by `platform.system()`
    #[arg(long, env = "PYVER_PRAGMA_PLATFORM")]
    pub platform: Option<String>,

    /// Implementation name as reported by `platform.python_implementation()`
    #[arg(long, env = "PYVER_PRAGMA_IMPLEMENTATION")]
    pub implementation: Option<String>,

    /// Highest minor version covered by `<` and `<=` qualifiers
    #[arg(long, env = "PYVER_PRAGMA_MAX_MINOR")]
    pub max_minor: Option<u32>,

    /// Interpreter used for detection
    #[arg(long, env = "PYVER_PRAGMA_INTERPRETER", default_value = "python3")]
    pub interpreter: String,

    /// YAML settings file
    #[arg(long, env = "PYVER_PRAGMA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Environment selection
    #[command(flatten)]
    pub env: EnvArgs,

    /// Which patterns to print
    #[arg(short, long, default_value = "all")]
    pub set: SetArg,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: GenerateFormat,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Environment selection
    #[command(flatten)]
    pub env: EnvArgs,

    /// Source file to scan (stdin when neither lines nor a file are given)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: ClassifyFormat,

    /// Lines to classify
    #[arg(conflicts_with = "file")]
    pub lines: Vec<String>,
}

/// Arguments for the detect command
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Interpreter to run
    #[arg(long, env = "PYVER_PRAGMA_INTERPRETER", default_value = "python3")]
    pub interpreter: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Pattern set selection
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetArg {
    /// Patterns for annotations that apply
    #[value(name = "match")]
    Match,
    /// Patterns that keep the baseline behavior
    #[value(name = "non-match")]
    NonMatch,
    /// Both, in host order
    #[default]
    All,
}

/// Output format for generated patterns
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerateFormat {
    /// One pattern per line
    #[default]
    Text,
    /// JSON document with categories
    Json,
    /// `[report] exclude_lines` section for a `.coveragerc`
    Coveragerc,
}

/// Output format for classification results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassifyFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::parse_from(["pyver-pragma", "generate"]);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.set, SetArg::All);
            assert_eq!(args.format, GenerateFormat::Text);
            assert_eq!(args.env.interpreter, "python3");
        } else {
            panic!("expected Generate command");
        }
    }

    #[test]
    fn test_parse_generate_environment() {
        let cli = Cli::parse_from([
            "pyver-pragma",
            "generate",
            "--python",
            "3.8",
            "--platform",
            "Linux",
            "--implementation",
            "CPython",
            "--max-minor",
            "12",
            "--set",
            "non-match",
            "--format",
            "coveragerc",
        ]);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.env.python, Some(Version::new(3, 8)));
            assert_eq!(args.env.platform.as_deref(), Some("Linux"));
            assert_eq!(args.env.max_minor, Some(12));
            assert_eq!(args.set, SetArg::NonMatch);
            assert_eq!(args.format, GenerateFormat::Coveragerc);
        } else {
            panic!("expected Generate command");
        }
    }

    #[test]
    fn test_parse_bad_version_fails() {
        let result = Cli::try_parse_from(["pyver-pragma", "generate", "--python", "three"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_classify_lines() {
        let cli = Cli::parse_from([
            "pyver-pragma",
            "classify",
            "--python",
            "3.6",
            "# pragma: no cover (<py38)",
            "# pragma: no cover",
        ]);
        if let Commands::Classify(args) = cli.command {
            assert_eq!(args.lines.len(), 2);
            assert!(args.file.is_none());
        } else {
            panic!("expected Classify command");
        }
    }

    #[test]
    fn test_classify_file_conflicts_with_lines() {
        let result = Cli::try_parse_from([
            "pyver-pragma",
            "classify",
            "--file",
            "a.py",
            "# pragma: no cover",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["pyver-pragma", "detect", "-vv", "--color", "never", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorArg::Never));
        if let Commands::Detect(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("expected Detect command");
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
