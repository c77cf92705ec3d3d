//! JSON output formatter for machine processing

use crate::domain::{Clock, DependencyResult, ProjectAggregate, Release, SolutionAggregate};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Only include dependencies that are behind
    quiet: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Libyears behind across all projects
    years_behind: f64,
    /// Per-manifest results
    projects: Vec<JsonProject<'a>>,
}

/// JSON representation of a project
#[derive(Serialize)]
struct JsonProject<'a> {
    manifest: String,
    language: String,
    years_behind: f64,
    average: f64,
    dependencies: Vec<JsonDependency<'a>>,
}

/// JSON representation of a dependency
#[derive(Serialize)]
struct JsonDependency<'a> {
    name: &'a str,
    installed: Option<&'a Release>,
    latest: Option<&'a Release>,
    days_behind: f64,
    years_behind: f64,
    pulse: Option<f64>,
    /// `major.minor.patch` distance, empty when a side is missing
    version_behind: String,
}

impl JsonFormatter {
    fn project_to_json<'a>(
        &self,
        project: &'a ProjectAggregate,
        clock: &dyn Clock,
    ) -> JsonProject<'a> {
        JsonProject {
            manifest: project.manifest().display().to_string(),
            language: project.language.to_string(),
            years_behind: project.years_behind(),
            average: project.average(),
            dependencies: project
                .details
                .iter()
                .filter(|result| !self.quiet || result.years_behind() > 0.0)
                .map(|result| Self::dependency_to_json(result, clock))
                .collect(),
        }
    }

    fn dependency_to_json<'a>(result: &'a DependencyResult, clock: &dyn Clock) -> JsonDependency<'a> {
        JsonDependency {
            name: &result.name,
            installed: result.installed.as_ref(),
            latest: result.latest.as_ref(),
            days_behind: result.days_behind(),
            years_behind: result.years_behind(),
            pulse: result.pulse(clock),
            version_behind: result.version_distance(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(
        &self,
        solution: &SolutionAggregate,
        clock: &dyn Clock,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            years_behind: solution.years_behind(),
            projects: solution
                .details
                .iter()
                .map(|project| self.project_to_json(project, clock))
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
