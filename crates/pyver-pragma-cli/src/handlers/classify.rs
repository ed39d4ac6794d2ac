//! Classify command handler

use super::pattern_set;
use crate::commands::{ClassifyArgs, ClassifyFormat};
use crate::config::CliConfig;
use crate::detect::Detector;
use crate::error::{CliError, CliResult};
use crate::output::{render_annotations, render_summary};
use std::fs;
use std::io::{Read, Write};

/// Collect the text to classify: positional lines, `--file`, or `input`
pub fn read_source(args: &ClassifyArgs, input: &mut impl Read) -> CliResult<String> {
    if !args.lines.is_empty() {
        return Ok(args.lines.join("\n"));
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("cannot read {}: {e}", path.display())));
    }
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text)
}

/// Execute the classify command
pub fn execute_classify(
    config: &CliConfig,
    args: &ClassifyArgs,
    detector: &dyn Detector,
    input: &mut impl Read,
    out: &mut impl Write,
) -> CliResult<()> {
    let set = pattern_set(&args.env, detector)?;
    let source = read_source(args, input)?;
    let annotations = set.scan(&source);
    tracing::info!(
        annotated = annotations.len(),
        excluded = annotations.iter().filter(|a| a.verdict.is_excluded()).count(),
        "classified source"
    );
    let mut rendered = render_annotations(&annotations, args.format, config.color.should_color())?;
    if config.verbosity.is_verbose() && args.format == ClassifyFormat::Text {
        rendered.push_str(&render_summary(set.environment(), &annotations));
    }
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::EnvArgs;
    use crate::config::{ColorChoice, Verbosity};
    use pyver_pragma::Environment;
    use std::io::Write as _;

    struct Fixed;

    impl Detector for Fixed {
        fn detect(&self) -> CliResult<Environment> {
            Ok(Environment::new((3, 6), "Linux", "CPython"))
        }
    }

    fn args(lines: &[&str]) -> ClassifyArgs {
        ClassifyArgs {
            env: EnvArgs::default(),
            file: None,
            format: ClassifyFormat::Json,
            lines: lines.iter().map(ToString::to_string).collect(),
        }
    }

    fn verdicts(out: &[u8]) -> Vec<String> {
        let value: Vec<serde_json::Value> = serde_json::from_slice(out).unwrap();
        value
            .iter()
            .map(|a| a["verdict"]["verdict"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_read_source_prefers_lines() {
        let mut stdin = "ignored".as_bytes();
        let text = read_source(&args(&["a", "b"]), &mut stdin).unwrap();
        assert_eq!(text, "a\nb");
    }

    #[test]
    fn test_read_source_stdin() {
        let mut stdin = "x = 1  # pragma: no cover\n".as_bytes();
        let text = read_source(&args(&[]), &mut stdin).unwrap();
        assert_eq!(text, "x = 1  # pragma: no cover\n");
    }

    #[test]
    fn test_read_source_missing_file() {
        let mut a = args(&[]);
        a.file = Some("/nonexistent/source.py".into());
        let err = read_source(&a, &mut std::io::empty()).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_classify_lines() {
        let config = CliConfig::new().with_color(ColorChoice::Never);
        let a = args(&[
            "# pragma: no cover (<py38)",
            "# pragma: no cover (<py34)",
            "# pragma: no cover (!Linux)",
            "# pragma: no cover",
            "print('hello')",
        ]);
        let mut out = Vec::new();
        execute_classify(&config, &a, &Fixed, &mut std::io::empty(), &mut out).unwrap();
        assert_eq!(
            verdicts(&out),
            ["applies", "does_not_apply", "does_not_apply", "baseline"]
        );
    }

    #[test]
    fn test_classify_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "import sys\nif sys.version_info < (3, 8):  # pragma: no cover (<py38)\n    pass"
        )
        .unwrap();
        let mut a = args(&[]);
        a.file = Some(file.path().to_path_buf());
        let mut out = Vec::new();
        execute_classify(&CliConfig::new(), &a, &Fixed, &mut std::io::empty(), &mut out).unwrap();
        let value: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.len(), 1);
        assert_eq!(value[0]["line"], 2);
    }

    #[test]
    fn test_classify_verbose_summary() {
        let mut a = args(&["# pragma: no cover (<py38)", "# pragma: no cover (<py34)"]);
        a.format = ClassifyFormat::Text;
        let normal = CliConfig::new().with_color(ColorChoice::Never);
        let mut out = Vec::new();
        execute_classify(&normal, &a, &Fixed, &mut std::io::empty(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);

        let verbose = normal.with_verbosity(Verbosity::Verbose);
        let mut out = Vec::new();
        execute_classify(&verbose, &a, &Fixed, &mut std::io::empty(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let last = text.lines().last().unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(last.contains("2 annotations, 1 excluded"));
        assert!(last.contains("CPython 3.6.0 on Linux"));
    }
}
