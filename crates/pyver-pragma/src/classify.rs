//! Line classification against a generated pattern set.

use crate::environment::Environment;
use crate::generator::{match_set_for, non_match_set_for};
use crate::pattern::{Category, Pattern, TRIGGER};
use crate::result::PragmaResult;
use crate::version::VersionBounds;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a coverage host treats a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// A qualified annotation that applies here: excluded
    Applies {
        /// Match-set category that matched
        category: Category,
    },
    /// An annotation without a usable qualifier: excluded as before
    Baseline {
        /// Non-match-set category that matched
        category: Category,
    },
    /// A qualified annotation that does not apply here: measured
    DoesNotApply,
    /// No trigger phrase on the line
    NotAnnotated,
}

impl Verdict {
    /// Whether the host excludes the line from coverage
    #[must_use]
    pub const fn is_excluded(self) -> bool {
        matches!(self, Self::Applies { .. } | Self::Baseline { .. })
    }

    /// Matched category, if any
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Applies { category } | Self::Baseline { category } => Some(category),
            Self::DoesNotApply | Self::NotAnnotated => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applies { category } => write!(f, "excluded ({category})"),
            Self::Baseline { category } => write!(f, "excluded (baseline, {category})"),
            Self::DoesNotApply => f.write_str("measured (does not apply)"),
            Self::NotAnnotated => f.write_str("not annotated"),
        }
    }
}

/// An annotated line found by [`PatternSet::scan`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// 1-indexed line number
    pub line: usize,
    /// Line text
    pub text: String,
    /// Classification
    pub verdict: Verdict,
}

/// Match and non-match sets generated for one environment
#[derive(Debug, Clone)]
pub struct PatternSet {
    environment: Environment,
    matches: Vec<Pattern>,
    non_matches: Vec<Pattern>,
    trigger: Regex,
}

impl PatternSet {
    /// Generate both sets for `environment`
    pub fn new(environment: Environment, bounds: &VersionBounds) -> PragmaResult<Self> {
        let matches = match_set_for(&environment, bounds)?;
        let non_matches = non_match_set_for(&environment)?;
        Ok(Self {
            environment,
            matches,
            non_matches,
            trigger: Regex::new(TRIGGER)?,
        })
    }

    /// Environment the sets were generated for
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Patterns for annotations that apply
    #[must_use]
    pub fn matches(&self) -> &[Pattern] {
        &self.matches
    }

    /// Patterns that keep the baseline behavior
    #[must_use]
    pub fn non_matches(&self) -> &[Pattern] {
        &self.non_matches
    }

    /// All patterns in the order they are appended to a host exclusion list
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.matches.iter().chain(&self.non_matches)
    }

    /// Host sources of all patterns
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        self.iter().map(|p| p.as_str().to_string()).collect()
    }

    /// Classify one line
    #[must_use]
    pub fn classify(&self, line: &str) -> Verdict {
        if !self.trigger.is_match(line) {
            return Verdict::NotAnnotated;
        }
        if let Some(p) = self.matches.iter().find(|p| p.is_match(line)) {
            return Verdict::Applies {
                category: p.category(),
            };
        }
        if let Some(p) = self.non_matches.iter().find(|p| p.is_match(line)) {
            return Verdict::Baseline {
                category: p.category(),
            };
        }
        Verdict::DoesNotApply
    }

    /// Whether the host excludes `line`
    #[must_use]
    pub fn is_excluded(&self, line: &str) -> bool {
        self.classify(line).is_excluded()
    }

    /// Classify every annotated line of `source`
    #[must_use]
    pub fn scan(&self, source: &str) -> Vec<Annotation> {
        source
            .lines()
            .enumerate()
            .filter_map(|(idx, text)| match self.classify(text) {
                Verdict::NotAnnotated => None,
                verdict => Some(Annotation {
                    line: idx + 1,
                    text: text.to_string(),
                    verdict,
                }),
            })
            .collect()
    }
}
