//! Output formatting for patterns, annotations and environments

use crate::commands::{ClassifyFormat, GenerateFormat, SetArg};
use crate::error::CliResult;
use console::style;
use pyver_pragma::{Annotation, Category, Environment, Pattern, PatternSet, Verdict};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
struct PatternEntry<'a> {
    category: Category,
    pattern: &'a str,
}

#[derive(Debug, Serialize)]
struct PatternReport<'a> {
    environment: &'a Environment,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<PatternEntry<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    non_match: Option<Vec<PatternEntry<'a>>>,
}

fn entries(patterns: &[Pattern]) -> Vec<PatternEntry<'_>> {
    patterns
        .iter()
        .map(|p| PatternEntry {
            category: p.category(),
            pattern: p.as_str(),
        })
        .collect()
}

fn selected(set: &PatternSet, which: SetArg) -> Vec<&Pattern> {
    match which {
        SetArg::Match => set.matches().iter().collect(),
        SetArg::NonMatch => set.non_matches().iter().collect(),
        SetArg::All => set.iter().collect(),
    }
}

/// Render a pattern set in the requested format
pub fn render_patterns(
    set: &PatternSet,
    which: SetArg,
    format: GenerateFormat,
) -> CliResult<String> {
    let mut out = String::new();
    match format {
        GenerateFormat::Text => {
            for pattern in selected(set, which) {
                let _ = writeln!(out, "{pattern}");
            }
        }
        GenerateFormat::Coveragerc => {
            let _ = writeln!(out, "# {}", set.environment());
            out.push_str("[report]\nexclude_lines =\n");
            for pattern in selected(set, which) {
                let _ = writeln!(out, "    {pattern}");
            }
        }
        GenerateFormat::Json => {
            let report = PatternReport {
                environment: set.environment(),
                matches: (which != SetArg::NonMatch).then(|| entries(set.matches())),
                non_match: (which != SetArg::Match).then(|| entries(set.non_matches())),
            };
            out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
        }
    }
    Ok(out)
}

fn verdict_label(verdict: Verdict, use_color: bool) -> String {
    let (label, detail) = match verdict {
        Verdict::Applies { category } => ("EXCLUDED", category.name()),
        Verdict::Baseline { category } => ("BASELINE", category.name()),
        Verdict::DoesNotApply => ("MEASURED", "does not apply"),
        Verdict::NotAnnotated => ("PLAIN", "not annotated"),
    };
    if !use_color {
        return format!("{label:<8} {detail:<14}");
    }
    let styled = match verdict {
        Verdict::Applies { .. } => style(format!("{label:<8}")).green().bold(),
        Verdict::Baseline { .. } => style(format!("{label:<8}")).cyan(),
        Verdict::DoesNotApply => style(format!("{label:<8}")).yellow().bold(),
        Verdict::NotAnnotated => style(format!("{label:<8}")).dim(),
    };
    format!("{styled} {}", style(format!("{detail:<14}")).dim())
}

/// Render classified annotations in the requested format
pub fn render_annotations(
    annotations: &[Annotation],
    format: ClassifyFormat,
    use_color: bool,
) -> CliResult<String> {
    match format {
        ClassifyFormat::Json => {
            let mut out = serde_json::to_string_pretty(annotations)?;
            out.push('\n');
            Ok(out)
        }
        ClassifyFormat::Text => {
            let mut out = String::new();
            for annotation in annotations {
                let _ = writeln!(
                    out,
                    "{:>5}  {}  {}",
                    annotation.line,
                    verdict_label(annotation.verdict, use_color),
                    annotation.text.trim()
                );
            }
            Ok(out)
        }
    }
}

/// One-line tally of a classification run
pub fn render_summary(environment: &Environment, annotations: &[Annotation]) -> String {
    let excluded = annotations
        .iter()
        .filter(|a| a.verdict.is_excluded())
        .count();
    format!(
        "{} annotations, {excluded} excluded ({environment})\n",
        annotations.len()
    )
}

/// Render a detected environment
pub fn render_environment(environment: &Environment, json: bool) -> CliResult<String> {
    if json {
        let mut out = serde_json::to_string_pretty(environment)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(format!(
        "version: {}\nplatform: {}\nimplementation: {}\n",
        environment.version, environment.platform, environment.implementation
    ))
}
