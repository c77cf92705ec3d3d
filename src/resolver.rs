//! Picks the installed and latest releases of a declared dependency
//!
//! - The declared requirement's version stands for the installed version
//! - Installed is the dated published version spelled exactly like the
//!   declared one, else the first dated one with the same numeric value
//! - Latest is the highest listed, dated version; pre-releases only count
//!   when the declared version is itself a pre-release
//! - When neither side can be found the declared version is reported as
//!   installed with an unknown date

use crate::domain::{Dependency, DependencyResult, Release, Version};
use crate::registry::{is_prerelease, PublishedVersion};

/// The version a dependency declares, if its requirement names one
pub fn declared_version(dependency: &Dependency) -> Option<Version> {
    match dependency.version_spec.installed_version() {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::debug!(
                dependency = %dependency.name,
                requirement = %dependency.version_spec,
                error = %e,
                "skipping dependency without a concrete version"
            );
            None
        }
    }
}

/// Resolve a dependency against the versions its registry publishes
pub fn resolve(
    dependency: &Dependency,
    declared: Version,
    published: &[PublishedVersion],
) -> DependencyResult {
    let raw = dependency.version_spec.version.trim_start_matches(['v', 'V']);

    // An undated match would be measured from the epoch
    let dated = || published.iter().filter(|p| p.published_at.is_some());
    let installed = dated()
        .find(|p| p.version == raw)
        .or_else(|| dated().find(|p| p.parsed() == Some(declared)))
        .map(|p| Release::from_timestamp(declared, p.published_at, p.listed));

    let allow_prerelease = is_prerelease(raw);
    let latest = published
        .iter()
        .filter(|p| p.listed && p.published_at.is_some())
        .filter(|p| allow_prerelease || !p.is_prerelease())
        .filter_map(|p| p.parsed().map(|version| (version, p)))
        // Versions equal after truncation: a final release beats its
        // pre-releases, then the most recently published wins
        .max_by(|(a, pa), (b, pb)| {
            a.cmp(b)
                .then_with(|| pb.is_prerelease().cmp(&pa.is_prerelease()))
                .then_with(|| pa.published_at.cmp(&pb.published_at))
        })
        .map(|(version, p)| Release::from_timestamp(version, p.published_at, true));

    if installed.is_none() && latest.is_none() {
        tracing::debug!(
            dependency = %dependency.name,
            "no matching releases published, using declared version"
        );
        return unresolved(dependency, declared);
    }

    DependencyResult::new(dependency.name.clone(), installed, latest)
}

/// Result for a dependency whose registry could not be queried
pub fn unresolved(dependency: &Dependency, declared: Version) -> DependencyResult {
    DependencyResult::new(
        dependency.name.clone(),
        Some(Release::undated(declared)),
        None,
    )
}
