//! Node.js (npm/yarn/pnpm) version requirement parser
//!
//! Handles:
//! - Exact: `1.2.3`, `=1.2.3`
//! - Caret: `^1.2.3`
//! - Tilde: `~1.2.3`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Wildcard: `*`, `1.x`, `1.2.*`
//! - Range: `>=1.0.0 <2.0.0`, `1.0.0 - 2.0.0`, `^1.0.0 || ^2.0.0`

use crate::domain::{Language, VersionSpecKind};
use crate::parser::VersionParser;

/// Node.js version requirement parser
pub struct NodeVersionParser;

impl VersionParser for NodeVersionParser {
    fn language(&self) -> Language {
        Language::Node
    }

    fn operator_kind(&self, operator: &str) -> Option<VersionSpecKind> {
        match operator {
            "" | "=" => Some(VersionSpecKind::Exact),
            "^" => Some(VersionSpecKind::Caret),
            "~" => Some(VersionSpecKind::Tilde),
            ">=" => Some(VersionSpecKind::GreaterOrEqual),
            ">" => Some(VersionSpecKind::Greater),
            "<=" | "<" => Some(VersionSpecKind::UpperBound),
            _ => None,
        }
    }

    fn split_range<'a>(&self, requirement: &'a str) -> Vec<&'a str> {
        requirement
            .split("||")
            .flat_map(|alternative| alternative.split(" - "))
            .flat_map(str::split_whitespace)
            .collect()
    }
}
