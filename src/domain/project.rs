//! Per-manifest and per-run aggregation of dependency results

use super::{DependencyResult, Language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dependency results for one manifest file, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAggregate {
    /// Path of the manifest the results belong to
    pub manifest: PathBuf,
    /// Ecosystem of the manifest
    pub language: Language,
    /// Per-dependency results
    pub details: Vec<DependencyResult>,
}

impl ProjectAggregate {
    /// Creates a new project aggregate
    pub fn new(
        manifest: impl Into<PathBuf>,
        language: Language,
        details: Vec<DependencyResult>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            language,
            details,
        }
    }

    /// Path of the manifest file
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Total libyears behind across all dependencies
    ///
    /// An empty total is `0.0`, never `-0.0`.
    pub fn years_behind(&self) -> f64 {
        self.details
            .iter()
            .map(DependencyResult::years_behind)
            .fold(0.0, |total, years| total + years)
    }

    /// Mean libyears behind per dependency, 0 for a manifest without dependencies
    pub fn average(&self) -> f64 {
        if self.details.is_empty() {
            return 0.0;
        }
        self.years_behind() / self.details.len() as f64
    }

    /// Dependencies with a newer release available
    pub fn outdated(&self) -> impl Iterator<Item = &DependencyResult> {
        self.details.iter().filter(|d| d.is_outdated())
    }

    /// Returns true if the manifest declared no dependencies we could check
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

/// All projects checked in a single run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionAggregate {
    /// Per-manifest aggregates, in discovery order
    pub details: Vec<ProjectAggregate>,
}

impl SolutionAggregate {
    /// Creates a new solution aggregate
    pub fn new(details: Vec<ProjectAggregate>) -> Self {
        Self { details }
    }

    /// Total libyears behind across all projects
    pub fn years_behind(&self) -> f64 {
        self.details
            .iter()
            .map(ProjectAggregate::years_behind)
            .fold(0.0, |total, years| total + years)
    }

    /// Every dependency result across all projects
    pub fn dependencies(&self) -> impl Iterator<Item = &DependencyResult> {
        self.details.iter().flat_map(|p| p.details.iter())
    }

    /// Total number of dependency results
    pub fn total_dependencies(&self) -> usize {
        self.details.iter().map(|p| p.details.len()).sum()
    }

    /// Returns true if no project was found
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}
