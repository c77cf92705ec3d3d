//! Declared version requirements as they appear in manifests
//!
//! Handles requirements like:
//! - Node.js: `^1.2.3`, `~1.2.3`, `>=1.0.0`, `1.2.3`
//! - Python: `==1.2.3`, `~=1.4`, `>=2.28`, `^1.2` (Poetry)
//! - Rust: `1.2.3`, `^1.2.3`, `~1.2.3`, `=1.2.3`
//!
//! libyear does not solve requirements; it takes the version written in the
//! requirement as the installed version.

use super::Version;
use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of version requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSpecKind {
    /// Exact/pinned version (`1.2.3` for Node, `==1.2.3` for Python, `=1.2.3` for Rust)
    Exact,
    /// Caret range (`^1.2.3`, or a bare Cargo version)
    Caret,
    /// Tilde range (`~1.2.3`) or PEP 440 compatible release (`~=1.2`)
    Tilde,
    /// Lower bound (`>=1.2.3`)
    GreaterOrEqual,
    /// Exclusive lower bound (`>1.2.3`)
    Greater,
    /// Upper bound only (`<2.0`, `<=2.0`)
    UpperBound,
    /// Wildcard (`1.2.*`, `1.x`, `*`)
    Wildcard,
    /// Several comparators (`>=1.0, <2.0`); the first lower bound is kept
    Range,
}

impl VersionSpecKind {
    /// Returns true if the requirement names a version that can stand for the installed one
    pub fn names_installed_version(&self) -> bool {
        !matches!(self, VersionSpecKind::UpperBound | VersionSpecKind::Wildcard)
    }
}

/// A version requirement with its original string representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSpec {
    /// The kind of requirement
    pub kind: VersionSpecKind,
    /// The raw requirement as it appears in the manifest
    pub raw: String,
    /// The version number written in the requirement (without operator)
    pub version: String,
    /// Operator to keep when rewriting the requirement (`^`, `~=`, `>=`)
    pub prefix: Option<String>,
}

impl VersionSpec {
    /// Creates a new VersionSpec
    pub fn new(kind: VersionSpecKind, raw: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            version: version.into(),
            prefix: None,
        }
    }

    /// Sets the operator prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The declared version as a [`Version`]
    ///
    /// Fails for requirements that do not name a concrete version.
    pub fn installed_version(&self) -> Result<Version, VersionError> {
        if !self.kind.names_installed_version() {
            return Err(VersionError::invalid(
                &self.raw,
                "requirement does not name a concrete version",
            ));
        }
        Version::parse(&self.version)
    }

    /// Returns true if the requirement can be rewritten to point at a newer version
    ///
    /// Ranges, upper bounds and wildcards are left alone.
    pub fn can_rewrite(&self) -> bool {
        matches!(
            self.kind,
            VersionSpecKind::Exact
                | VersionSpecKind::Caret
                | VersionSpecKind::Tilde
                | VersionSpecKind::GreaterOrEqual
                | VersionSpecKind::Greater
        )
    }

    /// Formats a new version while preserving the original operator
    pub fn format_updated(&self, new_version: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}{}", prefix, new_version),
            None => new_version.to_string(),
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
