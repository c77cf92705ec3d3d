//! Markdown output formatter
//!
//! Produces GitHub flavoured tables, one section per project.

use crate::domain::{Clock, SolutionAggregate};
use crate::output::{project_caption, project_rows, total_caption, OutputFormatter, COLUMNS};
use std::io::Write;

/// Markdown formatter
pub struct MarkdownFormatter {
    /// Only show dependencies that are behind
    quiet: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

/// Escape characters that would break a table cell
fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let cells: Vec<String> = cells.map(escape).collect();
    format!("| {} |", cells.join(" | "))
}

impl OutputFormatter for MarkdownFormatter {
    fn format(
        &self,
        solution: &SolutionAggregate,
        clock: &dyn Clock,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for project in &solution.details {
            if self.quiet && project.years_behind() <= 0.0 {
                continue;
            }

            writeln!(
                writer,
                "## {} ({})",
                project.manifest().display(),
                project.language
            )?;
            writeln!(writer)?;

            let rows = project_rows(project, clock, self.quiet);
            if !rows.is_empty() {
                writeln!(writer, "{}", table_line(COLUMNS.iter().copied()))?;
                writeln!(writer, "|{}", "---|".repeat(COLUMNS.len()))?;
                for row in &rows {
                    writeln!(writer, "{}", table_line(row.cells.iter().map(String::as_str)))?;
                }
                writeln!(writer)?;
            }

            writeln!(writer, "{}", project_caption(project))?;
            writeln!(writer)?;
        }

        if let Some(total) = total_caption(solution) {
            writeln!(writer, "**{}**", total)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::*;

    fn render(formatter: &MarkdownFormatter) -> String {
        let mut buffer = Vec::new();
        formatter.format(&solution(), &clock(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_markdown_output() {
        let output = render(&MarkdownFormatter::new(false));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "## app/Cargo.toml (Rust)");
        assert_eq!(lines[1], "");
        assert_eq!(
            lines[2],
            "| Package | Installed | Released | Latest | Released | Age (y) | Pulse (y) | Ver behind |"
        );
        assert_eq!(lines[3], "|---|---|---|---|---|---|---|---|");
        assert_eq!(
            lines[4],
            "| serde | 1.0.0 | 2021-01-01 | 1.2.0 | 2023-01-01 | 2.0 | 1.0 | 0.2.0 |"
        );
        assert_eq!(
            lines[6],
            "| log | 0.4.0 | N/A | N/A | N/A | N/A | N/A | N/A |"
        );
        assert!(output.contains("## web/package.json (Node.js)"));
        assert!(output.ends_with("**Total is 2.0 libyears behind**\n"));
    }

    #[test]
    fn test_markdown_quiet() {
        let output = render(&MarkdownFormatter::new(true));
        assert!(output.contains("| serde |"));
        assert!(!output.contains("| tokio |"));
        assert!(!output.contains("web/package.json"));
    }

    #[test]
    fn test_escape_pipe() {
        assert_eq!(escape("a|b"), "a\\|b");
    }
}
