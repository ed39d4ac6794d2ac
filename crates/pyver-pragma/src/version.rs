//! Version normalization and minor-version range arithmetic.
//!
//! Only `major` and `minor` take part in pattern generation. `major` must be
//! [`SUPPORTED_MAJOR`]; every qualifier category then draws its numbers from
//! one of the half-open ranges in [`MinorRanges`].

use crate::result::{PragmaError, PragmaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// The only major version family patterns can be generated for
pub const SUPPORTED_MAJOR: u32 = 3;

/// Highest minor version known when this release was cut
pub const DEFAULT_MAX_MINOR: u32 = 15;

/// Largest minor version, current or configured, patterns are generated for
pub const MINOR_CEILING: u32 = 99;

/// Python version in the shape of `sys.version_info`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Micro (patch) version
    #[serde(default)]
    pub micro: u32,
    /// Release level (`final`, `candidate`, ...)
    #[serde(default)]
    pub release_level: String,
    /// Release serial
    #[serde(default)]
    pub serial: u32,
}

impl Version {
    /// Create a version from major and minor
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            micro: 0,
            release_level: String::new(),
            serial: 0,
        }
    }

    /// Set the micro version
    #[must_use]
    pub const fn with_micro(mut self, micro: u32) -> Self {
        self.micro = micro;
        self
    }

    /// Set the release level and serial
    #[must_use]
    pub fn with_release(mut self, level: impl Into<String>, serial: u32) -> Self {
        self.release_level = level.into();
        self.serial = serial;
        self
    }

    /// Fail unless this version belongs to the supported family
    pub fn ensure_supported(&self) -> PragmaResult<()> {
        if self.major == SUPPORTED_MAJOR {
            Ok(())
        } else {
            Err(PragmaError::UnsupportedVersionFamily { major: self.major })
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.release_level.is_empty() && self.release_level != "final" {
            write!(f, " ({} {})", self.release_level, self.serial)?;
        }
        Ok(())
    }
}

impl From<(u32, u32)> for Version {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor)
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from((major, minor, micro): (u32, u32, u32)) -> Self {
        Self::new(major, minor).with_micro(micro)
    }
}

impl TryFrom<&[u32]> for Version {
    type Error = PragmaError;

    fn try_from(parts: &[u32]) -> PragmaResult<Self> {
        match *parts {
            [major, minor] => Ok(Self::new(major, minor)),
            [major, minor, micro, ..] => Ok(Self::new(major, minor).with_micro(micro)),
            _ => Err(PragmaError::invalid_version(
                format!("{parts:?}"),
                "expected at least major and minor components",
            )),
        }
    }
}

impl FromStr for Version {
    type Err = PragmaError;

    /// Parse `MAJOR.MINOR` or `MAJOR.MINOR.MICRO`
    fn from_str(s: &str) -> PragmaResult<Self> {
        let trimmed = s.trim();
        let mut numbers = Vec::with_capacity(3);
        for part in trimmed.split('.') {
            let n = part.parse::<u32>().map_err(|_| {
                PragmaError::invalid_version(s, format!("'{part}' is not a version number"))
            })?;
            numbers.push(n);
        }
        if numbers.len() > 3 {
            return Err(PragmaError::invalid_version(
                s,
                "expected at most three components",
            ));
        }
        Self::try_from(numbers.as_slice()).map_err(|_| {
            PragmaError::invalid_version(s, "expected at least major and minor components")
        })
    }
}

/// Upper bound on the minor versions patterns enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBounds {
    /// Highest minor version covered by `<` and `<=` qualifiers
    pub max_minor: u32,
}

impl Default for VersionBounds {
    fn default() -> Self {
        Self {
            max_minor: DEFAULT_MAX_MINOR,
        }
    }
}

impl VersionBounds {
    /// Create bounds with the default maximum minor
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum minor version
    #[must_use]
    pub const fn with_max_minor(mut self, max_minor: u32) -> Self {
        self.max_minor = max_minor;
        self
    }

    /// Validate `version` and derive the minor ranges for it.
    ///
    /// A minor above `max_minor` widens the upper bound to include it, so the
    /// current version is always inside `at_or_above` and `exact`. Neither
    /// the minor nor `max_minor` may exceed [`MINOR_CEILING`].
    pub fn ranges(&self, version: &Version) -> PragmaResult<MinorRanges> {
        version.ensure_supported()?;
        if self.max_minor > MINOR_CEILING {
            return Err(PragmaError::invalid_option(
                "max_minor",
                format!("{} is above the ceiling of {MINOR_CEILING}", self.max_minor),
            ));
        }
        let minor = version.minor;
        if minor > MINOR_CEILING {
            return Err(PragmaError::invalid_version(
                version.to_string(),
                format!("minor version is above the ceiling of {MINOR_CEILING}"),
            ));
        }
        if minor > self.max_minor {
            tracing::warn!(
                minor,
                max_minor = self.max_minor,
                "minor version exceeds the configured maximum; widening the bound"
            );
        }
        let next = minor + 1;
        let upper = self.max_minor.max(minor) + 1;
        Ok(MinorRanges {
            below: 0..minor,
            at_or_below: 0..next,
            above: next..upper,
            at_or_above: minor..upper,
            exact: minor..next,
        })
    }
}

/// Half-open minor ranges relative to the current minor version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinorRanges {
    /// `[0, minor)`: annotations written `>py3N`
    pub below: Range<u32>,
    /// `[0, minor]`: annotations written `>=py3N` or `py3N+`
    pub at_or_below: Range<u32>,
    /// `(minor, max]`: annotations written `<py3N`
    pub above: Range<u32>,
    /// `[minor, max]`: annotations written `<=py3N`
    pub at_or_above: Range<u32>,
    /// `{minor}`: annotations written `py3N`
    pub exact: Range<u32>,
}

/// Render a range as a regex alternation, `None` when it is empty
#[must_use]
pub fn alternation(range: &Range<u32>) -> Option<String> {
    if range.is_empty() {
        return None;
    }
    let members: Vec<String> = range.clone().map(|n| n.to_string()).collect();
    Some(members.join("|"))
}
