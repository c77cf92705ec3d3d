//! Rust (cargo) version requirement parser
//!
//! Handles:
//! - Default caret: `1.2.3`, `1.2`, `1`
//! - Caret: `^1.2.3`
//! - Exact: `=1.2.3`
//! - Tilde: `~1.2.3`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Wildcard: `*`, `1.*`, `1.2.*`
//! - Range: `>=1.0, <2.0`

use crate::domain::{Language, VersionSpecKind};
use crate::parser::VersionParser;

/// Rust version requirement parser
pub struct RustVersionParser;

impl VersionParser for RustVersionParser {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn operator_kind(&self, operator: &str) -> Option<VersionSpecKind> {
        match operator {
            "" | "^" => Some(VersionSpecKind::Caret),
            "=" => Some(VersionSpecKind::Exact),
            "~" => Some(VersionSpecKind::Tilde),
            ">=" => Some(VersionSpecKind::GreaterOrEqual),
            ">" => Some(VersionSpecKind::Greater),
            "<=" | "<" => Some(VersionSpecKind::UpperBound),
            _ => None,
        }
    }

    fn split_range<'a>(&self, requirement: &'a str) -> Vec<&'a str> {
        requirement
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }
}
