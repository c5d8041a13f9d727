//! Cluster version parsing and the supported-version policy
//!
//! The policy is an explicit list of major bands. Every band listed in
//! [`SUPPORTED_BANDS`] must have a full set of request and query
//! implementations registered in [`crate::resolver::Resolver`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Major version bands this tool has implementations for
pub const SUPPORTED_BANDS: &[VersionBand] = &[
    VersionBand(1),
    VersionBand(2),
    VersionBand(5),
    VersionBand(6),
    VersionBand(7),
];

/// Structured cluster version, e.g. `6.8.23` or `5.0.0-alpha1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,
}

impl Version {
    /// Parse a dot-separated version string.
    ///
    /// A bare major (`"6"`) is accepted. Extra numeric segments after the
    /// patch are ignored. A pre-release is either everything after the first
    /// `-` (`5.0.0-alpha1`) or an alphanumeric segment starting with a letter
    /// that follows the patch (`1.0.0.Beta2`).
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let unparsable = || Error::UnparsableVersion(input.to_string());

        let (numbers, pre) = match trimmed.split_once('-') {
            Some((numbers, pre)) if !pre.is_empty() => (numbers, Some(pre.to_string())),
            Some(_) => return Err(unparsable()),
            None => (trimmed, None),
        };

        let mut segments: Vec<&str> = numbers.split('.').collect();
        let pre = match pre {
            None if segments.len() > 3 && segments.last().is_some_and(|s| is_dotted_pre(s)) => {
                segments.pop().map(str::to_string)
            }
            pre => pre,
        };

        let numbers = segments
            .iter()
            .map(|s| {
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    s.parse::<u32>().map_err(|_| unparsable())
                } else {
                    Err(unparsable())
                }
            })
            .collect::<Result<Vec<u32>>>()?;

        let major = *numbers.first().ok_or_else(unparsable)?;
        Ok(Self {
            major,
            minor: numbers.get(1).copied().unwrap_or(0),
            patch: numbers.get(2).copied().unwrap_or(0),
            pre,
        })
    }

    /// The band used to pick protocol-compatible implementations
    pub fn band(&self) -> VersionBand {
        VersionBand(self.major)
    }
}

/// Old releases tag pre-releases as a fourth segment, e.g. `Beta2` or `RC1`
fn is_dotted_pre(segment: &str) -> bool {
    segment.starts_with(|c: char| c.is_ascii_alphabetic())
        && segment.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Major version band, rendered as `V{major}x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionBand(pub u32);

impl VersionBand {
    pub fn major(&self) -> u32 {
        self.0
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_BANDS.contains(self)
    }
}

impl fmt::Display for VersionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}x", self.0)
    }
}

impl FromStr for VersionBand {
    type Err = Error;

    /// Accepts a major token such as `"5"`
    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .map(VersionBand)
            .map_err(|_| Error::UnparsableVersion(s.to_string()))
    }
}

/// Leading segment before the first `.`, used as the dispatch key
pub fn major_token(version: &str) -> Option<&str> {
    let token = version.trim().split('.').next()?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Whether this tool can talk to a cluster reporting `version`.
///
/// Malformed version strings are reported as unsupported rather than
/// raising an error.
pub fn is_supported(version: &str) -> bool {
    match Version::parse(version) {
        Ok(v) => v.band().is_supported(),
        Err(_) => false,
    }
}

/// Highest major version with registered implementations
pub fn highest_supported_major() -> u32 {
    SUPPORTED_BANDS.iter().map(VersionBand::major).max().unwrap_or(0)
}
