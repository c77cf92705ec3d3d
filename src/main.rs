//! libyear - measure how far behind your dependencies are
//!
//! Supported manifests:
//! - Node.js (package.json)
//! - Python (pyproject.toml)
//! - Rust (Cargo.toml)

use clap::Parser;
use colored::Colorize;
use libyear::checker::{Checker, CheckerConfig};
use libyear::cli::CliArgs;
use libyear::domain::SystemClock;
use libyear::manifest::apply_all_updates;
use libyear::output::{create_formatter, OutputFormat};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

/// Exit code for a missing project or an exceeded limit
const EXIT_CHECK_FAILED: u8 = 1;

/// Exit code for fatal errors
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = init_tracing(args.quiet, args.verbose) {
        eprintln!("Warning: {}", e);
    }

    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LIBYEAR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("libyear v{}", env!("CARGO_PKG_VERSION"));
        for path in &args.paths {
            eprintln!("Target: {}", path.display());
        }
    }

    let config = CheckerConfig {
        recursive: args.recursive,
        show_progress: !args.quiet
            && args.output == OutputFormat::Table
            && io::stderr().is_terminal(),
        ..CheckerConfig::default()
    };
    let checker = Checker::new(config)?;
    let result = checker.run(&args.paths).await?;

    if args.verbose && !result.errors.is_empty() {
        eprintln!("Errors encountered:");
        for error in &result.errors {
            eprintln!("  - {}", error);
        }
        eprintln!();
    }

    if result.solution.is_empty() {
        eprintln!("No project files found");
        return Ok(ExitCode::from(EXIT_CHECK_FAILED));
    }

    let formatter = create_formatter(&args.output_config());
    let mut stdout = io::stdout().lock();
    formatter.format(&result.solution, &SystemClock, &mut stdout)?;
    stdout.flush()?;

    if args.update {
        for write in apply_all_updates(&result.solution) {
            if write.file_modified {
                eprintln!(
                    "Updated {} {} in {}",
                    write.updates_applied,
                    if write.updates_applied == 1 {
                        "dependency"
                    } else {
                        "dependencies"
                    },
                    write.path.display()
                );
            }
            for error in &write.errors {
                eprintln!("{} {}: {}", "warning:".yellow(), write.path.display(), error);
            }
        }
    }

    let violations = args.thresholds().violations(&result.solution);
    if violations.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        for violation in &violations {
            eprintln!("{} {}", "Limit exceeded:".red().bold(), violation);
        }
        Ok(ExitCode::from(EXIT_CHECK_FAILED))
    }
}
