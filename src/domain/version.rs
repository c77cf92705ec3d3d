//! Three-component version value
//!
//! Registry and manifest version strings come in many shapes (`v1.2`,
//! `1.2.3-beta.1`, `2.0.0rc1`, `4.1.0.2`). For libyear purposes only the
//! numeric `major.minor.patch` core matters, so everything after it is
//! discarded and missing components are zero-filled.

use crate::error::VersionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An immutable `major.minor.patch` version
///
/// Ordering is numeric, component by component, which the field order of
/// the derive gives us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Creates a version from its components
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string leniently
    ///
    /// - A leading `v`/`V` is stripped
    /// - Pre-release and build suffixes are dropped (`1.2.3-beta+sha` -> `1.2.3`)
    /// - Missing components are zero-filled (`1.2` -> `1.2.0`)
    /// - Components past the third are ignored (`1.2.3.4` -> `1.2.3`)
    ///
    /// Input without a numeric core (`latest`, `1.x`, `*`) is rejected.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let core_len = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        let core = &trimmed[..core_len];
        let rest = &trimmed[core_len..];

        // Wildcard requirements such as "1.x" or "1.2.*"
        if core.is_empty() || rest.starts_with(['x', 'X', '*']) {
            return Err(VersionError::invalid(input, "no numeric version core"));
        }

        let core = core.strip_suffix('.').unwrap_or(core);
        let mut components = [0u64; 3];
        for (index, part) in core.split('.').enumerate() {
            if part.is_empty() {
                return Err(VersionError::invalid(input, "empty version component"));
            }
            let value: u64 = part
                .parse()
                .map_err(|_| VersionError::invalid(input, "component out of range"))?;
            if index < 3 {
                components[index] = value;
            }
        }

        Ok(Self::new(components[0], components[1], components[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&semver::Version> for Version {
    fn from(version: &semver::Version) -> Self {
        Self::new(version.major, version.minor, version.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(serde::de::Error::custom)
    }
}
