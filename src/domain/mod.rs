//! Core domain models for libyear
//!
//! - Version and release values
//! - Per-dependency staleness (`DependencyResult`)
//! - Aggregation per manifest and per run
//! - Limit evaluation
//! - Declared dependencies and their requirements

mod clock;
mod dependency;
mod dependency_result;
mod language;
mod project;
mod release;
mod threshold;
mod version;
mod version_spec;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dependency::Dependency;
pub use dependency_result::{DependencyResult, VersionDistance};
pub use language::Language;
pub use project::{ProjectAggregate, SolutionAggregate};
pub use release::{unknown_date, Release, DAYS_PER_YEAR};
pub use threshold::{LimitViolation, ThresholdEvaluator};
pub use version::Version;
pub use version_spec::{VersionSpec, VersionSpecKind};
