//! pyver-pragma: version-conditioned `pragma: no cover` for coverage tools
//!
//! Generates the exclusion regexes that let a coverage host honor
//! annotations such as `# pragma: no cover (<py38)` or
//! `# pragma: no cover (!Windows)` only where they apply.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  (version, platform, implementation)                             │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  VersionBounds::ranges ──► MinorRanges ──► match_set ──┐         │
//! │                                                        ├──► host │
//! │                                     non_match_set ─────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every annotated line ends up in exactly one bucket:
//!
//! - matched by the match set: the qualifier applies, the line is excluded;
//! - matched by the non-match set: no qualifier this environment decides
//!   on (free text, another version family), excluded as before;
//! - matched by neither: the qualifier does not apply, coverage is measured.
//!
//! # Example
//!
//! ```
//! use pyver_pragma::{Environment, PatternSet, VersionBounds};
//!
//! let set = PatternSet::new(
//!     Environment::new((3, 6), "Linux", "CPython"),
//!     &VersionBounds::default(),
//! )
//! .unwrap();
//!
//! assert!(set.is_excluded("# pragma: no cover (<py38)"));
//! assert!(!set.is_excluded("# pragma: no cover (<py34)"));
//! assert!(!set.is_excluded("# pragma: no cover (!Linux)"));
//! assert!(set.is_excluded("# pragma: no cover"));
//! ```

#![warn(missing_docs)]

mod classify;
mod environment;
mod generator;
mod pattern;

/// Host-facing plugin adapter
pub mod plugin;

mod result;

/// Version normalization and range derivation
pub mod version;

pub use classify::{Annotation, PatternSet, Verdict};
pub use environment::Environment;
pub use generator::{match_set, match_set_for, non_match_set, non_match_set_for};
pub use pattern::{Category, Pattern, LITERAL_TRIGGER, TRIGGER};
pub use plugin::{
    coverage_init, ConfigHandle, Configurer, Coverage, CoverageConfig, PluginOptions,
    PluginRegistry, PyVerPragmaPlugin,
};
pub use result::{PragmaError, PragmaResult};
pub use version::{
    MinorRanges, Version, VersionBounds, DEFAULT_MAX_MINOR, MINOR_CEILING, SUPPORTED_MAJOR,
};
