//! CLI argument parsing module for libyear

use crate::domain::ThresholdEvaluator;
use crate::error::ConfigError;
use crate::output::{OutputConfig, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Parse a limit in libyears, rejecting negative and non-finite values
fn parse_limit(s: &str) -> Result<f64, String> {
    let invalid = || ConfigError::InvalidLimit {
        value: s.to_string(),
    }
    .to_string();

    let years: f64 = s.trim().parse().map_err(|_| invalid())?;
    if !years.is_finite() || years < 0.0 {
        return Err(invalid());
    }
    Ok(years)
}

/// Measure how many libyears your dependencies are behind
#[derive(Parser, Debug, Clone)]
#[command(
    name = "libyear",
    version,
    about = "Measure how many libyears your dependencies are behind"
)]
pub struct CliArgs {
    /// Manifest files or directories to check (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Rewrite manifests so outdated dependencies declare the latest version
    #[arg(short, long)]
    pub update: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Only show outdated dependencies
    #[arg(short, long)]
    pub quiet: bool,

    // Limits
    /// Fail if the total libyears behind exceeds this value
    #[arg(short = 'l', long, value_name = "YEARS", value_parser = parse_limit)]
    pub limit: Option<f64>,

    /// Fail if any project is more than this many libyears behind
    #[arg(short = 'p', long, value_name = "YEARS", value_parser = parse_limit)]
    pub limit_project: Option<f64>,

    /// Fail if any dependency is more than this many libyears behind
    #[arg(short = 'a', long, value_name = "YEARS", value_parser = parse_limit)]
    pub limit_any: Option<f64>,

    /// Search subdirectories even when a directory already has a manifest
    #[arg(short, long)]
    pub recursive: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Limits configured on the command line
    pub fn thresholds(&self) -> ThresholdEvaluator {
        ThresholdEvaluator::new(self.limit, self.limit_project, self.limit_any)
    }

    /// Output configuration derived from the flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_cli(self.output, self.quiet, self.no_color)
    }
}
