//! Staleness of a single dependency

use super::{Clock, Release, DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How far apart two versions are, in the most significant differing component
///
/// Components are signed: when the "latest" release is lower than the
/// installed one the distance comes out negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDistance {
    pub major: i128,
    pub minor: i128,
    pub patch: i128,
}

impl VersionDistance {
    /// Distance between an installed and a latest release
    ///
    /// Only one component is ever non-zero: patch when major and minor match,
    /// minor when only major matches, major otherwise.
    pub fn between(installed: &Release, latest: &Release) -> Self {
        let from = installed.version;
        let to = latest.version;
        let delta = |a: u64, b: u64| i128::from(a) - i128::from(b);

        if from.major == to.major && from.minor == to.minor {
            Self {
                major: 0,
                minor: 0,
                patch: delta(to.patch, from.patch),
            }
        } else if from.major == to.major {
            Self {
                major: 0,
                minor: delta(to.minor, from.minor),
                patch: 0,
            }
        } else {
            Self {
                major: delta(to.major, from.major),
                minor: 0,
                patch: 0,
            }
        }
    }
}

impl fmt::Display for VersionDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Installed vs latest release for one named dependency
///
/// Either side may be missing: `installed` when the declared version is not
/// known to the registry, `latest` when the package could not be resolved.
/// Producers never build a result with both sides missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyResult {
    /// Package name as declared in the manifest
    pub name: String,
    /// Release currently declared
    pub installed: Option<Release>,
    /// Newest eligible release in the registry
    pub latest: Option<Release>,
}

impl DependencyResult {
    /// Creates a new result
    pub fn new(name: impl Into<String>, installed: Option<Release>, latest: Option<Release>) -> Self {
        Self {
            name: name.into(),
            installed,
            latest,
        }
    }

    /// Days between the installed and latest release dates
    ///
    /// Zero when either side is missing. Not clamped: negative when the
    /// latest release predates the installed one.
    pub fn days_behind(&self) -> f64 {
        match (&self.installed, &self.latest) {
            (Some(installed), Some(latest)) => (latest.date - installed.date).num_days() as f64,
            _ => 0.0,
        }
    }

    /// Libyears behind (`days_behind / 365`)
    pub fn years_behind(&self) -> f64 {
        self.days_behind() / DAYS_PER_YEAR
    }

    /// Structured version distance, `None` when either side is missing
    pub fn distance(&self) -> Option<VersionDistance> {
        match (&self.installed, &self.latest) {
            (Some(installed), Some(latest)) => Some(VersionDistance::between(installed, latest)),
            _ => None,
        }
    }

    /// Version distance rendered as `major.minor.patch`, empty when either side is missing
    pub fn version_distance(&self) -> String {
        self.distance()
            .map(|distance| distance.to_string())
            .unwrap_or_default()
    }

    /// Pulse of the latest release, if any
    pub fn pulse(&self, clock: &dyn Clock) -> Option<f64> {
        self.latest.as_ref().map(|latest| latest.pulse(clock))
    }

    /// True when the latest release is older than the installed one
    pub fn is_ahead(&self) -> bool {
        self.days_behind() < 0.0
    }

    /// True when a newer release than the installed one exists
    pub fn is_outdated(&self) -> bool {
        match (&self.installed, &self.latest) {
            (Some(installed), Some(latest)) => latest.version > installed.version,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, Version};
    use chrono::NaiveDate;

    fn release(version: &str, y: i32, m: u32, d: u32) -> Release {
        Release::new(
            Version::parse(version).unwrap(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            true,
        )
    }

    #[test]
    fn test_scenario_three_years_behind() {
        let result = DependencyResult::new(
            "serde",
            Some(release("1.0.0", 2020, 1, 1)),
            Some(release("2.0.0", 2023, 1, 1)),
        );

        assert_eq!(result.days_behind(), 1096.0);
        assert!((result.years_behind() - 3.0).abs() < 0.01);
        assert_eq!(result.version_distance(), "1.0.0");
        assert!(result.is_outdated());
        assert!(!result.is_ahead());
    }

    #[test]
    fn test_same_release_is_current() {
        let current = release("1.4.2", 2022, 3, 4);
        let result = DependencyResult::new("tokio", Some(current.clone()), Some(current));

        assert_eq!(result.years_behind(), 0.0);
        assert_eq!(result.version_distance(), "0.0.0");
        assert!(!result.is_outdated());
    }

    #[test]
    fn test_missing_latest() {
        let result = DependencyResult::new("gone", Some(release("1.0.0", 2020, 1, 1)), None);
        assert_eq!(result.days_behind(), 0.0);
        assert_eq!(result.years_behind(), 0.0);
        assert_eq!(result.version_distance(), "");
        assert!(result.distance().is_none());
        assert!(result.pulse(&FixedClock(NaiveDate::MAX)).is_none());
    }

    #[test]
    fn test_missing_installed() {
        let result = DependencyResult::new("new-dep", None, Some(release("3.0.0", 2023, 1, 1)));
        assert_eq!(result.years_behind(), 0.0);
        assert_eq!(result.version_distance(), "");
        assert!(!result.is_outdated());
    }

    #[test]
    fn test_distance_patch() {
        let result = DependencyResult::new(
            "a",
            Some(release("1.2.3", 2020, 1, 1)),
            Some(release("1.2.9", 2020, 6, 1)),
        );
        assert_eq!(result.version_distance(), "0.0.6");
    }

    #[test]
    fn test_distance_minor() {
        let result = DependencyResult::new(
            "a",
            Some(release("1.2.3", 2020, 1, 1)),
            Some(release("1.5.0", 2020, 6, 1)),
        );
        assert_eq!(result.version_distance(), "0.3.0");
    }

    #[test]
    fn test_distance_major() {
        let result = DependencyResult::new(
            "a",
            Some(release("1.2.3", 2020, 1, 1)),
            Some(release("2.0.0", 2020, 6, 1)),
        );
        assert_eq!(result.version_distance(), "1.0.0");
    }

    #[test]
    fn test_inverted_order_is_negative() {
        let result = DependencyResult::new(
            "prerelease-installed",
            Some(release("2.1.0", 2024, 1, 1)),
            Some(release("2.0.0", 2023, 1, 1)),
        );

        assert_eq!(result.days_behind(), -365.0);
        assert_eq!(result.years_behind(), -1.0);
        assert_eq!(result.version_distance(), "0.-1.0");
        assert!(result.is_ahead());
        assert!(!result.is_outdated());
    }

    #[test]
    fn test_pulse_uses_latest_release() {
        let result = DependencyResult::new(
            "a",
            Some(release("1.0.0", 2020, 1, 1)),
            Some(release("1.1.0", 2021, 1, 1)),
        );
        let clock = FixedClock(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(result.pulse(&clock), Some(1.0));
    }
}
