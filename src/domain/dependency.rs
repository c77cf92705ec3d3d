//! Dependencies as declared in a manifest

use super::{Language, VersionSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A package dependency declared in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Declared version requirement
    pub version_spec: VersionSpec,
    /// Whether this is a development dependency
    pub is_dev: bool,
    /// The ecosystem this dependency belongs to
    pub language: Language,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        version_spec: VersionSpec,
        is_dev: bool,
        language: Language,
    ) -> Self {
        Self {
            name: name.into(),
            version_spec,
            is_dev,
            language,
        }
    }

    /// Creates a new production dependency
    pub fn production(
        name: impl Into<String>,
        version_spec: VersionSpec,
        language: Language,
    ) -> Self {
        Self::new(name, version_spec, false, language)
    }

    /// Creates a new development dependency
    pub fn development(
        name: impl Into<String>,
        version_spec: VersionSpec,
        language: Language,
    ) -> Self {
        Self::new(name, version_spec, true, language)
    }

    /// Returns the declared version string
    pub fn version(&self) -> &str {
        &self.version_spec.version
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(
            f,
            "{}@{}{} [{}]",
            self.name, self.version_spec, dev_marker, self.language
        )
    }
}
