//! Python version requirement parser
//!
//! Handles PEP 440 specifiers and Poetry constraints:
//! - Exact: `==1.2.3`, `===1.2.3`
//! - Caret: `^1.2.3` and bare `1.2.3` (Poetry)
//! - Compatible release: `~=1.2`, `~1.2.3` (Poetry)
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Wildcard: `*`, `1.*`, `==1.2.*`
//! - Range: `>=1.0,<2.0`, `>=1.0,!=1.3`

use crate::domain::{Language, VersionSpecKind};
use crate::parser::VersionParser;

/// Python version requirement parser
pub struct PythonVersionParser;

impl VersionParser for PythonVersionParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn operator_kind(&self, operator: &str) -> Option<VersionSpecKind> {
        match operator {
            "==" | "===" => Some(VersionSpecKind::Exact),
            "" | "^" => Some(VersionSpecKind::Caret),
            "~=" | "~" => Some(VersionSpecKind::Tilde),
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
