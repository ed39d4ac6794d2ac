//! Match-set and non-match-set generation.
//!
//! The match set recognizes annotations that apply to the current
//! environment; the non-match set restores the unconditional behavior for
//! annotations whose trailing text the match set does not understand.
//! Lines matched by neither carry a supported-family or negation qualifier
//! that does not apply here, so their coverage is still measured.

use crate::environment::Environment;
use crate::pattern::{Category, Fragments, Pattern};
use crate::result::PragmaResult;
use crate::version::{Version, VersionBounds};

/// Patterns for every annotation that applies to `version` on
/// `platform`/`implementation`.
///
/// Categories whose minor range is empty (`>` on x.0, `<` at the maximum
/// minor) are omitted; the remaining patterns keep the order of
/// [`Category::MATCH_SET`].
///
/// # Example
/// ```
/// use pyver_pragma::{match_set, Version, VersionBounds};
///
/// let patterns = match_set(&Version::new(3, 6), "Linux", "CPython", &VersionBounds::new()).unwrap();
/// assert!(patterns.iter().any(|p| p.is_match("# pragma: no cover (<py38)")));
/// assert!(!patterns.iter().any(|p| p.is_match("# pragma: no cover (<py34)")));
/// assert!(match_set(&Version::new(2, 7), "Linux", "CPython", &VersionBounds::new()).is_err());
/// ```
pub fn match_set(
    version: &Version,
    platform: &str,
    implementation: &str,
    bounds: &VersionBounds,
) -> PragmaResult<Vec<Pattern>> {
    let ranges = bounds.ranges(version)?;
    let fragments = Fragments::new(&[platform, implementation])?;

    let mut patterns = Vec::with_capacity(Category::MATCH_SET.len());
    for category in Category::MATCH_SET {
        if category == Category::Unqualified {
            patterns.push(fragments.unqualified());
        } else if let Some(pattern) = fragments.versioned(category, &ranges)? {
            patterns.push(pattern);
        }
    }

    tracing::debug!(
        version = %version,
        platform,
        implementation,
        count = patterns.len(),
        "generated match set"
    );
    Ok(patterns)
}

/// Patterns for annotations that stay unconditionally excluded.
///
/// The first catches trailing text that is not a qualifier the match set
/// decides on: free text, unclosed parentheses, and qualifiers naming only
/// another version family such as `(py27)`. A qualifier negating
/// `platform` or `implementation` is left alone. The second catches the bare
/// trigger phrase. Neither depends on the version.
///
/// # Example
/// ```
/// use pyver_pragma::non_match_set;
///
/// let patterns = non_match_set("Linux", "CPython").unwrap();
/// assert!(patterns.iter().any(|p| p.is_match("# pragma: no cover (py27)")));
/// assert!(!patterns.iter().any(|p| p.is_match("# pragma: no cover (<py34)")));
/// assert!(!patterns.iter().any(|p| p.is_match("# pragma: no cover (py27 !Linux)")));
/// ```
pub fn non_match_set(platform: &str, implementation: &str) -> PragmaResult<Vec<Pattern>> {
    let fragments = Fragments::new(&[platform, implementation])?;
    let patterns = vec![fragments.unrecognized(), fragments.plain()];
    tracing::debug!(
        platform,
        implementation,
        count = patterns.len(),
        "generated non-match set"
    );
    Ok(patterns)
}

/// Match set for `environment`
pub fn match_set_for(
    environment: &Environment,
    bounds: &VersionBounds,
) -> PragmaResult<Vec<Pattern>> {
    match_set(
        &environment.version,
        &environment.platform,
        &environment.implementation,
        bounds,
    )
}

/// Non-match set for `environment`
pub fn non_match_set_for(environment: &Environment) -> PragmaResult<Vec<Pattern>> {
    non_match_set(&environment.platform, &environment.implementation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn categories(patterns: &[Pattern]) -> Vec<Category> {
        patterns.iter().map(Pattern::category).collect()
    }

    fn bounds() -> VersionBounds {
        VersionBounds::new().with_max_minor(9)
    }

    #[test]
    fn test_full_match_set_order() {
        let patterns = match_set(&Version::new(3, 6), "Linux", "CPython", &bounds()).unwrap();
        assert_eq!(categories(&patterns), Category::MATCH_SET.to_vec());
    }

    #[test]
    fn test_match_set_drops_empty_categories() {
        let first = match_set(&Version::new(3, 0), "Linux", "CPython", &bounds()).unwrap();
        assert!(!categories(&first).contains(&Category::GreaterThan));
        assert_eq!(first.len(), 6);

        let last = match_set(&Version::new(3, 9), "Linux", "CPython", &bounds()).unwrap();
        assert!(!categories(&last).contains(&Category::LessThan));
        assert_eq!(last.len(), 6);
    }

    #[test]
    fn test_match_set_is_reproducible() {
        let a = match_set(&Version::new(3, 8), "Darwin", "PyPy", &bounds()).unwrap();
        let b = match_set(&Version::new(3, 8), "Darwin", "PyPy", &bounds()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_match_set_sources() {
        let patterns = match_set(&Version::new(3, 6), "Linux", "CPython", &bounds()).unwrap();
        let sources: Vec<&str> = patterns.iter().map(Pattern::as_str).collect();
        let t = crate::TRIGGER;
        let v = "(?!.*!Linux)(?!.*!CPython)";
        assert_eq!(
            sources,
            vec![
                format!(r"{t}\s*\((?=\s*<py3(?:7|8|9)\b){v}.*\)"),
                format!(r"{t}\s*\((?=\s*<=py3(?:6|7|8|9)\b){v}.*\)"),
                format!(r"{t}\s*\((?=\s*>py3(?:0|1|2|3|4|5)\b){v}.*\)"),
                format!(r"{t}\s*\((?=\s*py3(?:0|1|2|3|4|5|6)\b\+){v}.*\)"),
                format!(r"{t}\s*\((?=\s*>=py3(?:0|1|2|3|4|5|6)\b){v}.*\)"),
                format!(r"{t}\s*\((?=\s*py3(?:6)\b){v}.*\)"),
                format!(r"{t}\s*\((?!.*py[0-9]+){v}.*\)"),
            ]
        );
    }

    #[test]
    fn test_unsupported_family_produces_nothing() {
        for major in [1, 2, 4] {
            let err = match_set(&Version::new(major, 6), "Linux", "CPython", &bounds());
            assert!(err.unwrap_err().is_unsupported_family());
        }
    }

    #[test]
    fn test_non_match_set_shape() {
        let patterns = non_match_set("Linux", "CPython").unwrap();
        assert_eq!(categories(&patterns), Category::NON_MATCH_SET.to_vec());
    }

    #[test]
    fn test_non_match_set_depends_on_environment() {
        let linux = non_match_set("Linux", "CPython").unwrap();
        let windows = non_match_set_for(&Environment::new((3, 6), "Windows", "PyPy")).unwrap();
        let line = "# pragma: no cover (py27 !Linux)";
        assert!(!linux.iter().any(|p| p.is_match(line)));
        assert!(windows.iter().any(|p| p.is_match(line)));
        assert!(linux[0].as_str().contains("(?=.*!Linux)|(?=.*!CPython)"));
        assert_eq!(linux[1], windows[1]);
    }

    #[test]
    fn test_match_set_for_environment() {
        let env = Environment::new((3, 6), "Linux", "CPython");
        let patterns = match_set_for(&env, &bounds()).unwrap();
        assert!(patterns
            .iter()
            .any(|p| p.is_match("# pragma: no cover (>=py36)")));
        assert!(!patterns
            .iter()
            .any(|p| p.is_match("# pragma: no cover (>=py37)")));
    }
}
