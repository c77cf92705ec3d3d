//! Rewriting manifests so outdated dependencies declare their latest version
//!
//! Only dependencies with both releases known and a newer latest version are
//! touched. The requirement operator and the surrounding formatting are kept.
//! A dependency that cannot be rewritten is recorded and the rest of the file
//! is still updated.

use crate::domain::{ProjectAggregate, SolutionAggregate};
use crate::error::ManifestError;
use crate::manifest::{get_parser, ManifestParser};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of applying updates to a manifest file
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Number of updates successfully applied
    pub updates_applied: usize,
    /// Whether the file was actually modified
    pub file_modified: bool,
    /// Errors encountered during update
    pub errors: Vec<String>,
}

impl WriteResult {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            updates_applied: 0,
            file_modified: false,
            errors: Vec::new(),
        }
    }

    /// Returns true if any updates were successfully applied
    pub fn has_updates(&self) -> bool {
        self.updates_applied > 0
    }

    /// Returns true if any errors occurred
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Rewrite one manifest with the latest versions of its outdated dependencies
pub fn apply_updates(
    project: &ProjectAggregate,
    parser: &dyn ManifestParser,
) -> Result<WriteResult, ManifestError> {
    let path = project.manifest();
    let mut result = WriteResult::new(path);
    let mut content = read_manifest(path)?;

    for dependency in project.outdated() {
        let Some(latest) = &dependency.latest else {
            continue;
        };
        let new_version = latest.version.to_string();

        match parser.update_version(&content, &dependency.name, &new_version) {
            Ok(updated) => {
                tracing::debug!(
                    dependency = %dependency.name,
                    version = %new_version,
                    manifest = %path.display(),
                    "updated requirement"
                );
                content = updated;
                result.updates_applied += 1;
            }
            Err(e) => {
                result
                    .errors
                    .push(format!("Failed to update {}: {}", dependency.name, e.at(path)));
            }
        }
    }

    if result.has_updates() {
        write_manifest(path, &content)?;
        result.file_modified = true;
    }

    Ok(result)
}

/// Apply updates to every manifest with outdated dependencies
pub fn apply_all_updates(solution: &SolutionAggregate) -> Vec<WriteResult> {
    solution
        .details
        .iter()
        .filter(|project| project.outdated().next().is_some())
        .map(|project| {
            let parser = get_parser(project.language);
            apply_updates(project, parser.as_ref()).unwrap_or_else(|e| {
                let mut result = WriteResult::new(project.manifest());
                result
                    .errors
                    .push(format!("Failed to process manifest: {}", e));
                result
            })
        })
        .collect()
}

/// Read a manifest file content
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ManifestError::not_found(path),
        _ => ManifestError::read_error(path, e),
    })
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
