//! pyver-pragma: version-conditioned coverage exclusions
//!
//! ## Usage
//!
//! ```bash
//! pyver-pragma generate                        # Patterns for the detected python3
//! pyver-pragma generate --python 3.8 --format coveragerc
//! pyver-pragma classify --file src/compat.py   # Which annotations apply here
//! pyver-pragma detect --json
//! ```

use clap::Parser;
use pyver_pragma_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, InterpreterDetector,
    Verbosity,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(&config);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Generate(args) => {
            let detector = InterpreterDetector::new(&args.env.interpreter);
            handlers::execute_generate(&args, &detector, &mut stdout)
        }
        Commands::Classify(args) => {
            let detector = InterpreterDetector::new(&args.env.interpreter);
            let mut stdin = io::stdin().lock();
            handlers::execute_classify(&config, &args, &detector, &mut stdin, &mut stdout)
        }
        Commands::Detect(args) => {
            let detector = InterpreterDetector::new(&args.interpreter);
            handlers::execute_detect(&args, &detector, &mut stdout)
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
