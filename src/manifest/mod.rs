//! Manifest discovery, parsing and in-place rewriting
//!
//! This module provides functionality to:
//! - Find manifest files under the paths given on the command line
//! - Parse declared dependencies in declaration order
//! - Rewrite declared versions without disturbing the rest of the file

mod cargo_toml;
mod detector;
mod package_json;
mod pyproject_toml;
mod writer;

pub use cargo_toml::CargoTomlParser;
pub use detector::{detect_manifests, ManifestInfo};
pub use package_json::PackageJsonParser;
pub use pyproject_toml::PyprojectTomlParser;
pub use writer::{apply_all_updates, apply_updates, read_manifest, write_manifest, WriteResult};

use crate::domain::{Dependency, Language};
use crate::error::ManifestError;
use crate::parser::VersionParser;
use regex::Regex;
use std::path::Path;

/// Trait for parsing manifest files
pub trait ManifestParser {
    /// Parse dependencies from a manifest file
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError>;

    /// Returns the language this parser handles
    fn language(&self) -> Language;

    /// Update a dependency version in the manifest content
    fn update_version(
        &self,
        content: &str,
        package: &str,
        new_version: &str,
    ) -> Result<String, ManifestError>;
}

/// Get a manifest parser for the specified language
pub fn get_parser(language: Language) -> Box<dyn ManifestParser> {
    match language {
        Language::Node => Box::new(PackageJsonParser),
        Language::Python => Box::new(PyprojectTomlParser),
        Language::Rust => Box::new(CargoTomlParser),
    }
}

/// Parse dependencies from a manifest file path
pub fn parse_manifest(path: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let language = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(Language::from_manifest_filename)
        .ok_or_else(|| ManifestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    let content = read_manifest(path)?;
    get_parser(language)
        .parse(&content)
        .map_err(|e| e.at(path))
}

/// Replaces the first requirement matched by `pattern` that can be rewritten
///
/// `pattern` must capture the requirement text in a group named `req`.
/// Returns `None` when nothing matched.
pub(crate) fn rewrite_requirement(
    content: &str,
    pattern: &Regex,
    parser: &dyn VersionParser,
    new_version: &str,
) -> Option<String> {
    pattern.captures_iter(content).find_map(|caps| {
        let req = caps.name("req")?;
        let spec = parser.parse(req.as_str())?;
        if !spec.can_rewrite() {
            return None;
        }
        Some(format!(
            "{}{}{}",
            &content[..req.start()],
            spec.format_updated(new_version),
            &content[req.end()..]
        ))
    })
}

/// Builds the error returned when a package could not be rewritten
pub(crate) fn not_updated(manifest: &str, package: &str) -> ManifestError {
    ManifestError::InvalidVersionSpec {
        path: manifest.into(),
        spec: package.to_string(),
        message: "package not found or its requirement cannot be rewritten".to_string(),
    }
}
