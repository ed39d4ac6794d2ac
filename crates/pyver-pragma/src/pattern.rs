//! Exclusion patterns and their in-process matchers.
//!
//! Every [`Pattern`] carries two renditions of the same rule:
//!
//! - the host source, a backtracking regex with lookarounds in the dialect of
//!   the coverage tool's exclusion list;
//! - a [`regex`]-backed matcher that evaluates the lookaround clauses as
//!   explicit checks, so patterns can be exercised without the host.
//!
//! Both renditions are assembled from the same fragments below.

use crate::version::{alternation, MinorRanges};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The host's built-in trigger regex for `pragma: no cover`
pub const TRIGGER: &str = r"(?i)#\s*pragma[:\s]?\s*no\s*cover";

/// The literal form some hosts keep in their exclusion list instead of [`TRIGGER`]
pub const LITERAL_TRIGGER: &str = "pragma: no cover";

/// Any version marker, whatever the family
const VERSION_MARKER: &str = r"py[0-9]+";

/// A version marker of the supported family, with its optional operator and `+`
const SUPPORTED_MARKER: &str = r".{0,2}py3[0-9]\+?";

/// Kind of annotation a pattern recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// `(<py3N)`
    LessThan,
    /// `(<=py3N)`
    LessOrEqual,
    /// `(>py3N)`
    GreaterThan,
    /// `(py3N+)`
    Plus,
    /// `(>=py3N)`
    GreaterOrEqual,
    /// `(py3N)`
    Exact,
    /// A parenthesized qualifier with no version marker, e.g. `(!Windows)`
    Unqualified,
    /// Trailing text that is not a parenthesized qualifier, or a qualifier
    /// naming another version family, e.g. `(py27)`
    Unrecognized,
    /// Nothing after the trigger phrase
    Plain,
}

impl Category {
    /// Match-set categories in generation order
    pub const MATCH_SET: [Self; 7] = [
        Self::LessThan,
        Self::LessOrEqual,
        Self::GreaterThan,
        Self::Plus,
        Self::GreaterOrEqual,
        Self::Exact,
        Self::Unqualified,
    ];

    /// Non-match-set categories in generation order
    pub const NON_MATCH_SET: [Self; 2] = [Self::Unrecognized, Self::Plain];

    /// Short name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LessThan => "lt",
            Self::LessOrEqual => "lte",
            Self::GreaterThan => "gt",
            Self::Plus => "plus",
            Self::GreaterOrEqual => "gte",
            Self::Exact => "exact",
            Self::Unqualified => "unqualified",
            Self::Unrecognized => "unrecognized",
            Self::Plain => "plain",
        }
    }

    /// Comparison operator written before the version marker
    #[must_use]
    pub const fn operator(self) -> Option<&'static str> {
        match self {
            Self::LessThan => Some("<"),
            Self::LessOrEqual => Some("<="),
            Self::GreaterThan => Some(">"),
            Self::GreaterOrEqual => Some(">="),
            Self::Plus | Self::Exact => Some(""),
            Self::Unqualified | Self::Unrecognized | Self::Plain => None,
        }
    }

    /// Whether patterns of this category belong to the match set
    #[must_use]
    pub const fn is_match_set(self) -> bool {
        !matches!(self, Self::Unrecognized | Self::Plain)
    }

    /// Minor versions for which an annotation of this category applies
    #[must_use]
    pub const fn range(self, ranges: &MinorRanges) -> Option<&Range<u32>> {
        match self {
            Self::LessThan => Some(&ranges.above),
            Self::LessOrEqual => Some(&ranges.at_or_above),
            Self::GreaterThan => Some(&ranges.below),
            Self::Plus | Self::GreaterOrEqual => Some(&ranges.at_or_below),
            Self::Exact => Some(&ranges.exact),
            Self::Unqualified | Self::Unrecognized | Self::Plain => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled fragments shared by every pattern of one generation call
#[derive(Debug, Clone)]
pub(crate) struct Fragments {
    trigger: Regex,
    version_marker: Regex,
    supported_marker: Regex,
    vetoes: Vec<Veto>,
}

#[derive(Debug, Clone)]
struct Veto {
    marker: String,
    regex: Regex,
}

impl Fragments {
    /// Compile the trigger and one veto per negated name
    pub(crate) fn new(negated: &[&str]) -> Result<Self, regex::Error> {
        let vetoes = negated
            .iter()
            .map(|name| {
                let marker = format!("!{}", regex::escape(name));
                Ok(Veto {
                    regex: Regex::new(&format!("(?i){marker}"))?,
                    marker,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            trigger: Regex::new(TRIGGER)?,
            version_marker: Regex::new(&format!("(?i){VERSION_MARKER}"))?,
            supported_marker: Regex::new(&format!("(?i){SUPPORTED_MARKER}"))?,
            vetoes,
        })
    }

    /// `(?!.*!name)` for every negated name
    fn veto_source(&self) -> String {
        self.vetoes
            .iter()
            .map(|v| format!("(?!.*{})", v.marker))
            .collect()
    }

    /// Versioned qualifier pattern, `None` when the category's range is empty
    pub(crate) fn versioned(
        &self,
        category: Category,
        ranges: &MinorRanges,
    ) -> Result<Option<Pattern>, regex::Error> {
        let (Some(op), Some(range)) = (category.operator(), category.range(ranges)) else {
            return Ok(None);
        };
        let Some(alts) = alternation(range) else {
            return Ok(None);
        };
        let plus = if category == Category::Plus { r"\+" } else { "" };
        let head = format!(r"\s*{op}py3(?:{alts})\b{plus}");
        let source = format!(r"{TRIGGER}\s*\((?={head}){}.*\)", self.veto_source());
        let shape = Shape::Versioned {
            head: Regex::new(&format!("(?i)^{head}"))?,
        };
        Ok(Some(self.pattern(category, source, shape)))
    }

    /// Parenthesized qualifier carrying no version marker
    pub(crate) fn unqualified(&self) -> Pattern {
        let source = format!(
            r"{TRIGGER}\s*\((?!.*{VERSION_MARKER}){}.*\)",
            self.veto_source()
        );
        self.pattern(Category::Unqualified, source, Shape::Unversioned)
    }

    /// Trailing text the match set has no say over.
    ///
    /// Rejected are closed qualifiers that carry a supported-family marker,
    /// negate the current environment, or carry no version marker at all;
    /// everything else after the trigger is matched through end of line.
    pub(crate) fn unrecognized(&self) -> Pattern {
        let claimed: String = std::iter::once(format!("(?=.*{SUPPORTED_MARKER})"))
            .chain(self.vetoes.iter().map(|v| format!("(?=.*{})", v.marker)))
            .chain(std::iter::once(format!("(?!.*{VERSION_MARKER})")))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"{TRIGGER}(?!\s*\((?:{claimed}).*\)).+$");
        self.pattern(Category::Unrecognized, source, Shape::Unrecognized)
    }

    /// Trigger phrase at end of line
    pub(crate) fn plain(&self) -> Pattern {
        let source = format!("{TRIGGER}$");
        self.pattern(Category::Plain, source, Shape::Plain)
    }

    fn pattern(&self, category: Category, source: String, shape: Shape) -> Pattern {
        Pattern {
            category,
            source,
            matcher: Matcher {
                trigger: self.trigger.clone(),
                version_marker: self.version_marker.clone(),
                supported_marker: self.supported_marker.clone(),
                vetoes: self.vetoes.iter().map(|v| v.regex.clone()).collect(),
                shape,
            },
        }
    }
}

/// One exclusion rule: its category, host source and matcher
#[derive(Debug, Clone)]
pub struct Pattern {
    category: Category,
    source: String,
    matcher: Matcher,
}

impl Pattern {
    /// Category of annotation this pattern recognizes
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Regex source for the host's exclusion list
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the host would consider `line` matched by this pattern
    ///
    /// `line` is a single source line; anything after a newline is ignored.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        let line = line.split('\n').next().unwrap_or_default();
        self.matcher
            .trigger
            .find_iter(line)
            .any(|m| self.matcher.matches_rest(&line[m.end()..]))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.source == other.source
    }
}

impl Eq for Pattern {}

#[derive(Debug, Clone)]
struct Matcher {
    trigger: Regex,
    version_marker: Regex,
    supported_marker: Regex,
    vetoes: Vec<Regex>,
    shape: Shape,
}

#[derive(Debug, Clone)]
enum Shape {
    Versioned { head: Regex },
    Unversioned,
    Unrecognized,
    Plain,
}

/// Text inside an opening parenthesis directly after the trigger
fn qualifier_body(rest: &str) -> Option<&str> {
    rest.trim_start().strip_prefix('(')
}

impl Matcher {
    fn matches_rest(&self, rest: &str) -> bool {
        match &self.shape {
            Shape::Versioned { head } => {
                qualifier_body(rest).is_some_and(|body| head.is_match(body) && self.closed_unvetoed(body))
            }
            Shape::Unversioned => qualifier_body(rest).is_some_and(|body| {
                !self.version_marker.is_match(body) && self.closed_unvetoed(body)
            }),
            Shape::Unrecognized => {
                !rest.is_empty()
                    && !qualifier_body(rest).is_some_and(|body| {
                        body.contains(')')
                            && (self.supported_marker.is_match(body)
                                || self.is_vetoed(body)
                                || !self.version_marker.is_match(body))
                    })
            }
            Shape::Plain => rest.is_empty(),
        }
    }

    fn closed_unvetoed(&self, body: &str) -> bool {
        body.contains(')') && !self.is_vetoed(body)
    }

    fn is_vetoed(&self, body: &str) -> bool {
        self.vetoes.iter().any(|veto| veto.is_match(body))
    }
}
