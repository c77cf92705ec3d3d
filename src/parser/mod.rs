//! Version requirement parsers for the supported ecosystems
//!
//! - Node.js (npm/yarn/pnpm)
//! - Python (PEP 440 / Poetry)
//! - Rust (cargo)
//!
//! Every ecosystem writes requirements as one or more comparators, an
//! operator followed by a version. The parsers only differ in which
//! operators they know and how comparators are joined into ranges.

mod node;
mod python;
mod rust;

pub use node::NodeVersionParser;
pub use python::PythonVersionParser;
pub use rust::RustVersionParser;

use crate::domain::{Language, VersionSpec, VersionSpecKind};
use regex::Regex;
use std::sync::LazyLock;

static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\^|~=|~|===|==|=|>=|>|<=|<|!=)?\s*v?(\d+(?:\.\d+)*(?:[-+._]?[0-9A-Za-z][0-9A-Za-z.+-]*)?)$",
    )
    .unwrap()
});
static WILDCARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[=^~]*\s*v?(?:\d+\.){0,2}[xX*](?:\.[xX*]){0,2}$").unwrap()
});
static OPERATOR_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([<>=^~!]+)\s+").unwrap());

/// Trait for parsing version requirements
pub trait VersionParser {
    /// Returns the language this parser handles
    fn language(&self) -> Language;

    /// Maps an operator (empty for a bare version) to a requirement kind
    fn operator_kind(&self, operator: &str) -> Option<VersionSpecKind>;

    /// Splits a normalized requirement into its comparators
    fn split_range<'a>(&self, requirement: &'a str) -> Vec<&'a str>;

    /// Parse a version requirement string
    fn parse(&self, version_str: &str) -> Option<VersionSpec> {
        let trimmed = version_str.trim();
        if trimmed.is_empty() {
            return None;
        }

        let normalized = OPERATOR_SPACE_RE.replace_all(trimmed, "$1");
        let comparators = self.split_range(&normalized);

        if comparators.len() > 1 {
            // The first lower bound stands for the installed version
            let lower = comparators
                .iter()
                .filter_map(|c| self.parse_comparator(c))
                .find(|spec| spec.kind.names_installed_version())?;
            return Some(VersionSpec::new(
                VersionSpecKind::Range,
                trimmed,
                lower.version,
            ));
        }

        let mut spec = self.parse_comparator(&normalized)?;
        spec.raw = trimmed.to_string();
        Some(spec)
    }

    /// Parse a single comparator such as `>=1.2.3`
    fn parse_comparator(&self, comparator: &str) -> Option<VersionSpec> {
        let comparator = comparator.trim();

        if WILDCARD_RE.is_match(comparator) {
            return Some(VersionSpec::new(
                VersionSpecKind::Wildcard,
                comparator,
                comparator,
            ));
        }

        let caps = COMPARATOR_RE.captures(comparator)?;
        let operator = caps.get(1).map_or("", |m| m.as_str());
        let version = caps.get(2)?.as_str();
        let kind = self.operator_kind(operator)?;

        let spec = VersionSpec::new(kind, comparator, version);
        if operator.is_empty() {
            Some(spec)
        } else {
            Some(spec.with_prefix(operator))
        }
    }
}

/// Get a version parser for the specified language
pub fn get_parser(language: Language) -> Box<dyn VersionParser + Send + Sync> {
    match language {
        Language::Node => Box::new(NodeVersionParser),
        Language::Python => Box::new(PythonVersionParser),
        Language::Rust => Box::new(RustVersionParser),
    }
}
