//! Output formatting for libyear results
//!
//! This module provides:
//! - Table output for terminals
//! - JSON output for machine processing
//! - Markdown output for pull requests and wikis

mod json;
mod markdown;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

use crate::domain::{Clock, DependencyResult, ProjectAggregate, Release, SolutionAggregate};
use std::io::Write;

/// Placeholder for values that cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Column headers shared by the table and markdown formats
pub const COLUMNS: [&str; 8] = [
    "Package",
    "Installed",
    "Released",
    "Latest",
    "Released",
    "Age (y)",
    "Pulse (y)",
    "Ver behind",
];

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output for machine processing
    Json,
    /// GitHub flavoured markdown
    #[value(name = "mkd", alias = "markdown")]
    Markdown,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (table, json, mkd)
    pub format: OutputFormat,
    /// Only show dependencies that are behind
    pub quiet: bool,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quiet: false,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(format: OutputFormat, quiet: bool, no_color: bool) -> Self {
        Self {
            format,
            quiet,
            color: !no_color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a whole solution
    fn format(
        &self,
        solution: &SolutionAggregate,
        clock: &dyn Clock,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Table => Box::new(TextFormatter::new(config.quiet, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.quiet)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(config.quiet)),
    }
}

/// One dependency rendered as display cells
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row {
    pub cells: [String; 8],
    pub years_behind: f64,
}

impl Row {
    pub(crate) fn new(result: &DependencyResult, clock: &dyn Clock) -> Self {
        let installed = result.installed.as_ref();
        let latest = result.latest.as_ref();
        let version_behind = result.version_distance();

        Self {
            cells: [
                result.name.clone(),
                release_version(installed),
                release_date(installed),
                release_version(latest),
                release_date(latest),
                if installed.is_some() && latest.is_some() {
                    years(result.years_behind())
                } else {
                    NOT_AVAILABLE.to_string()
                },
                result
                    .pulse(clock)
                    .map(years)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                if version_behind.is_empty() {
                    NOT_AVAILABLE.to_string()
                } else {
                    version_behind
                },
            ],
            years_behind: result.years_behind(),
        }
    }
}

/// Rows of a project, keeping only those behind in quiet mode
pub(crate) fn project_rows(project: &ProjectAggregate, clock: &dyn Clock, quiet: bool) -> Vec<Row> {
    project
        .details
        .iter()
        .filter(|result| !quiet || result.years_behind() > 0.0)
        .map(|result| Row::new(result, clock))
        .collect()
}

/// Project caption line
pub(crate) fn project_caption(project: &ProjectAggregate) -> String {
    format!(
        "Project is {} libyears behind. Average of {} libyears",
        years(project.years_behind()),
        years(project.average())
    )
}

/// Solution total line, only meaningful with more than one project
pub(crate) fn total_caption(solution: &SolutionAggregate) -> Option<String> {
    (solution.details.len() > 1)
        .then(|| format!("Total is {} libyears behind", years(solution.years_behind())))
}

/// Format a number of years with one decimal
pub(crate) fn years(value: f64) -> String {
    format!("{:.1}", value)
}

fn release_version(release: Option<&Release>) -> String {
    release
        .map(|r| r.version.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn release_date(release: Option<&Release>) -> String {
    release
        .filter(|r| r.has_known_date())
        .map(|r| r.date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_output_config_from_cli() {
        let config = OutputConfig::from_cli(OutputFormat::Json, true, true);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.quiet);
        assert!(!config.color);
    }

    #[test]
    fn test_output_format_value_names() {
        use clap::ValueEnum;
        assert_eq!(
            OutputFormat::from_str("mkd", false).unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(
            OutputFormat::from_str("markdown", false).unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(
            OutputFormat::from_str("table", false).unwrap(),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_row_for_outdated_dependency() {
        let project = rust_project();
        let row = Row::new(&project.details[0], &clock());
        assert_eq!(
            row.cells,
            [
                "serde",
                "1.0.0",
                "2021-01-01",
                "1.2.0",
                "2023-01-01",
                "2.0",
                "1.0",
                "0.2.0"
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_row_for_unresolved_dependency() {
        let project = rust_project();
        let row = Row::new(&project.details[2], &clock());
        assert_eq!(row.cells[1], "0.4.0");
        assert_eq!(row.cells[2], NOT_AVAILABLE);
        assert_eq!(row.cells[3], NOT_AVAILABLE);
        assert_eq!(row.cells[5], NOT_AVAILABLE);
        assert_eq!(row.cells[6], NOT_AVAILABLE);
        assert_eq!(row.cells[7], NOT_AVAILABLE);
    }

    #[test]
    fn test_project_rows_quiet() {
        let project = rust_project();
        assert_eq!(project_rows(&project, &clock(), false).len(), 3);

        let quiet = project_rows(&project, &clock(), true);
        assert_eq!(quiet.len(), 1);
        assert_eq!(quiet[0].cells[0], "serde");
    }

    #[test]
    fn test_captions() {
        let solution = solution();
        assert_eq!(
            project_caption(&solution.details[0]),
            "Project is 2.0 libyears behind. Average of 0.7 libyears"
        );
        assert_eq!(
            total_caption(&solution).as_deref(),
            Some("Total is 2.0 libyears behind")
        );

        let single = SolutionAggregate::new(vec![node_project()]);
        assert!(total_caption(&single).is_none());
    }
}
