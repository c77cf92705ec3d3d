//! Versions as a registry reports them

use crate::domain::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One published version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedVersion {
    /// The version string exactly as the registry spells it
    pub version: String,
    /// Publication time, when the registry knows it
    pub published_at: Option<DateTime<Utc>>,
    /// False for yanked or deprecated versions
    pub listed: bool,
}

impl PublishedVersion {
    /// Create a listed version
    pub fn new(version: impl Into<String>, published_at: Option<DateTime<Utc>>) -> Self {
        Self {
            version: version.into(),
            published_at,
            listed: true,
        }
    }

    /// Mark the version as yanked or deprecated
    pub fn unlisted(mut self) -> Self {
        self.listed = false;
        self
    }

    /// The version as a numeric [`Version`], if it has a numeric core
    pub fn parsed(&self) -> Option<Version> {
        Version::parse(&self.version).ok()
    }

    /// Returns true for alpha, beta, release candidate and dev versions
    ///
    /// Semver strings are judged by their pre-release identifiers; anything
    /// else (PEP 440) is a pre-release when a non-`post` suffix follows the
    /// numeric core.
    pub fn is_prerelease(&self) -> bool {
        is_prerelease(&self.version)
    }
}

/// Pre-release check shared by published and declared versions
pub(crate) fn is_prerelease(version: &str) -> bool {
    let version = version.trim().trim_start_matches(['v', 'V']);
    if let Ok(semver) = semver::Version::parse(version) {
        return !semver.pre.is_empty();
    }

    let suffix = version
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
        .trim_start_matches(['-', '_', '.']);

    !(suffix.is_empty()
        || suffix.starts_with('+')
        || suffix.starts_with(|c: char| c.is_ascii_digit())
        || suffix.to_ascii_lowercase().starts_with("post"))
}

/// Sort versions ascending by numeric value, then by their raw spelling
pub fn sort_versions(versions: &mut [PublishedVersion]) {
    versions.sort_by(|a, b| match (a.parsed(), b.parsed()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.version.cmp(&b.version)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.version.cmp(&b.version),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semver_prereleases() {
        assert!(is_prerelease("1.0.0-beta.1"));
        assert!(is_prerelease("2.0.0-rc.1"));
        assert!(!is_prerelease("1.0.0"));
        assert!(!is_prerelease("1.0.0+build.5"));
        assert!(!is_prerelease("v1.2.3"));
    }

    #[test]
    fn test_pep440_prereleases() {
        assert!(is_prerelease("5.0a1"));
        assert!(is_prerelease("5.0b2"));
        assert!(is_prerelease("5.0rc1"));
        assert!(is_prerelease("2.0.0.dev0"));
        assert!(!is_prerelease("1.0.post1"));
        assert!(!is_prerelease("2.28"));
        assert!(!is_prerelease("4.1.0.2"));
    }

    #[test]
    fn test_unlisted() {
        let version = PublishedVersion::new("1.0.0", None);
        assert!(version.listed);
        assert!(!version.unlisted().listed);
    }

    #[test]
    fn test_parsed() {
        assert_eq!(
            PublishedVersion::new("2.0", None).parsed(),
            Some(Version::new(2, 0, 0))
        );
        assert_eq!(PublishedVersion::new("nightly", None).parsed(), None);
    }

    #[test]
    fn test_sort_versions_numeric() {
        let mut versions: Vec<PublishedVersion> = ["1.10.0", "1.2.0", "1.9.0", "garbage", "1.2"]
            .into_iter()
            .map(|v| PublishedVersion::new(v, None))
            .collect();

        sort_versions(&mut versions);

        let order: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(order, ["garbage", "1.2", "1.2.0", "1.9.0", "1.10.0"]);
    }
}
