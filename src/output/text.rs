//! Table output formatter for terminals
//!
//! Renders one aligned table per project, followed by its libyear caption.
//! Colors highlight how far behind each dependency is.

use crate::domain::{Clock, ProjectAggregate, SolutionAggregate};
use crate::output::{
    project_caption, project_rows, total_caption, OutputFormatter, Row, COLUMNS,
};
use colored::Colorize;
use std::io::Write;

/// Columns holding numbers, right aligned
const NUMERIC_COLUMNS: [usize; 2] = [5, 6];

/// Age column, colored by how far behind the dependency is
const AGE_COLUMN: usize = 5;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Only show dependencies that are behind
    quiet: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(quiet: bool, color: bool) -> Self {
        Self { quiet, color }
    }

    fn column_widths(rows: &[Row]) -> [usize; 8] {
        let mut widths = COLUMNS.map(|header| header.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn pad(cell: &str, width: usize, column: usize) -> String {
        if NUMERIC_COLUMNS.contains(&column) {
            format!("{:>width$}", cell, width = width)
        } else {
            format!("{:<width$}", cell, width = width)
        }
    }

    fn colorize_age(&self, padded: String, years_behind: f64) -> String {
        if !self.color {
            return padded;
        }
        if years_behind >= 2.0 {
            padded.red().to_string()
        } else if years_behind > 0.0 {
            padded.yellow().to_string()
        } else {
            padded.green().to_string()
        }
    }

    fn write_header(&self, widths: &[usize; 8], writer: &mut dyn Write) -> std::io::Result<()> {
        let header: Vec<String> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| Self::pad(name, widths[i], i))
            .collect();
        let header = header.join("  ");
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");

        if self.color {
            writeln!(writer, "{}", header.bold())?;
            writeln!(writer, "{}", rule.dimmed())
        } else {
            writeln!(writer, "{}", header)?;
            writeln!(writer, "{}", rule)
        }
    }

    fn write_row(
        &self,
        row: &Row,
        widths: &[usize; 8],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let cells: Vec<String> = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded = Self::pad(cell, widths[i], i);
                if i == AGE_COLUMN {
                    self.colorize_age(padded, row.years_behind)
                } else {
                    padded
                }
            })
            .collect();
        writeln!(writer, "{}", cells.join("  ").trim_end())
    }

    fn format_project(
        &self,
        project: &ProjectAggregate,
        clock: &dyn Clock,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.quiet && project.years_behind() <= 0.0 {
            return Ok(());
        }

        let title = format!("{} ({})", project.manifest().display(), project.language);
        if self.color {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }

        let rows = project_rows(project, clock, self.quiet);
        if !rows.is_empty() {
            let widths = Self::column_widths(&rows);
            self.write_header(&widths, writer)?;
            for row in &rows {
                self.write_row(row, &widths, writer)?;
            }
        }

        writeln!(writer, "{}", project_caption(project))?;
        writeln!(writer)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(
        &self,
        solution: &SolutionAggregate,
        clock: &dyn Clock,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for project in &solution.details {
            self.format_project(project, clock, writer)?;
        }

        if let Some(total) = total_caption(solution) {
            if self.color {
                writeln!(writer, "{}", total.bold())?;
            } else {
                writeln!(writer, "{}", total)?;
            }
        }

        Ok(())
    }
}
