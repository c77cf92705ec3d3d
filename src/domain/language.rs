//! Package ecosystems libyear knows how to check

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Node.js ecosystem (package.json, npm registry)
    Node,
    /// Python ecosystem (pyproject.toml, PyPI)
    Python,
    /// Rust ecosystem (Cargo.toml, crates.io)
    Rust,
}

impl Language {
    /// Returns the manifest filename for this language
    pub fn manifest_filename(&self) -> &'static str {
        match self {
            Language::Node => "package.json",
            Language::Python => "pyproject.toml",
            Language::Rust => "Cargo.toml",
        }
    }

    /// Returns the language whose manifest has this file name
    pub fn from_manifest_filename(file_name: &str) -> Option<Language> {
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.manifest_filename() == file_name)
    }

    /// Returns the registry queried for this language
    pub fn registry_name(&self) -> &'static str {
        match self {
            Language::Node => "npm",
            Language::Python => "PyPI",
            Language::Rust => "crates.io",
        }
    }

    /// Returns the display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Node => "Node.js",
            Language::Python => "Python",
            Language::Rust => "Rust",
        }
    }

    /// Returns all supported languages
    pub fn all() -> &'static [Language] {
        &[Language::Node, Language::Python, Language::Rust]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
