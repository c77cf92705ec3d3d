//! Libyear limits and their evaluation

use super::SolutionAggregate;
use std::fmt;
use std::path::PathBuf;

/// A single limit that a solution exceeded
#[derive(Debug, Clone, PartialEq)]
pub enum LimitViolation {
    /// Solution total above `--limit`
    Total { years: f64, limit: f64 },
    /// A project above `--limit-project`
    Project {
        manifest: PathBuf,
        years: f64,
        limit: f64,
    },
    /// A dependency above `--limit-any`
    Dependency {
        manifest: PathBuf,
        name: String,
        years: f64,
        limit: f64,
    },
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitViolation::Total { years, limit } => write!(
                f,
                "total of {:.1} libyears exceeds the limit of {:.1}",
                years, limit
            ),
            LimitViolation::Project {
                manifest,
                years,
                limit,
            } => write!(
                f,
                "{} is {:.1} libyears behind, over the project limit of {:.1}",
                manifest.display(),
                years,
                limit
            ),
            LimitViolation::Dependency {
                manifest,
                name,
                years,
                limit,
            } => write!(
                f,
                "{} in {} is {:.1} libyears behind, over the dependency limit of {:.1}",
                name,
                manifest.display(),
                years,
                limit
            ),
        }
    }
}

/// Decides whether a solution breaks any configured libyear limit
///
/// Each limit is optional; `None` means unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdEvaluator {
    /// Maximum libyears for the whole solution
    pub limit_total: Option<f64>,
    /// Maximum libyears for any single project
    pub limit_project: Option<f64>,
    /// Maximum libyears for any single dependency
    pub limit_any: Option<f64>,
}

impl ThresholdEvaluator {
    /// Creates a new evaluator
    pub fn new(limit_total: Option<f64>, limit_project: Option<f64>, limit_any: Option<f64>) -> Self {
        Self {
            limit_total,
            limit_project,
            limit_any,
        }
    }

    /// Returns true if no limit is configured
    pub fn is_unconstrained(&self) -> bool {
        self.limit_total.is_none() && self.limit_project.is_none() && self.limit_any.is_none()
    }

    /// Returns true if any configured limit is exceeded
    pub fn any_limit_exceeded(&self, solution: &SolutionAggregate) -> bool {
        let total = self
            .limit_total
            .is_some_and(|limit| solution.years_behind() > limit);
        let project = self.limit_project.is_some_and(|limit| {
            solution.details.iter().any(|p| p.years_behind() > limit)
        });
        let any = self
            .limit_any
            .is_some_and(|limit| solution.dependencies().any(|d| d.years_behind() > limit));

        total || project || any
    }

    /// Every violation, in the order total, projects, dependencies
    pub fn violations(&self, solution: &SolutionAggregate) -> Vec<LimitViolation> {
        let mut violations = Vec::new();

        if let Some(limit) = self.limit_total {
            let years = solution.years_behind();
            if years > limit {
                violations.push(LimitViolation::Total { years, limit });
            }
        }

        if let Some(limit) = self.limit_project {
            for project in &solution.details {
                let years = project.years_behind();
                if years > limit {
                    violations.push(LimitViolation::Project {
                        manifest: project.manifest.clone(),
                        years,
                        limit,
                    });
                }
            }
        }

        if let Some(limit) = self.limit_any {
            for project in &solution.details {
                for dependency in &project.details {
                    let years = dependency.years_behind();
                    if years > limit {
                        violations.push(LimitViolation::Dependency {
                            manifest: project.manifest.clone(),
                            name: dependency.name.clone(),
                            years,
                            limit,
                        });
                    }
                }
            }
        }

        violations
    }
}
