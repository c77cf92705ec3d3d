//! Manifest discovery under the paths given on the command line
//!
//! - A file path is used as-is when its name is a supported manifest
//! - A directory contributes the manifests directly inside it
//! - Subdirectories are searched when a directory has no manifest of its
//!   own, or always in recursive mode
//! - Hidden directories, `node_modules`, `target` and virtual environments
//!   are never entered

use crate::domain::Language;
use crate::error::{AppError, ConfigError, IoError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const SKIPPED_DIRS: [&str; 5] = ["node_modules", "target", "venv", "__pycache__", "site-packages"];

/// Information about a detected manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Language/ecosystem of the manifest
    pub language: Language,
}

impl ManifestInfo {
    /// Create a new ManifestInfo
    pub fn new(path: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            path: path.into(),
            language,
        }
    }

    /// Describes `path` if its file name is a supported manifest
    pub fn from_path(path: &Path) -> Option<Self> {
        let language = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(Language::from_manifest_filename)?;
        Some(Self::new(path, language))
    }
}

/// Detect manifest files under the given paths
///
/// Missing paths and files that are not manifests are configuration
/// errors. Unreadable subdirectories are skipped with a warning.
pub fn detect_manifests(paths: &[PathBuf], recursive: bool) -> Result<Vec<ManifestInfo>, AppError> {
    let mut found = Vec::new();

    for path in paths {
        if path.is_file() {
            let info = ManifestInfo::from_path(path).ok_or_else(|| ConfigError::InvalidPath {
                path: path.clone(),
                message: "not a supported manifest file".to_string(),
            })?;
            found.push(info);
        } else if path.is_dir() {
            scan_directory(path, recursive, &mut found)?;
        } else {
            return Err(IoError::directory_not_found(path).into());
        }
    }

    let mut seen = HashSet::new();
    found.retain(|info| seen.insert(info.path.clone()));

    tracing::debug!(count = found.len(), "detected manifests");
    Ok(found)
}

fn scan_directory(
    dir: &Path,
    recursive: bool,
    found: &mut Vec<ManifestInfo>,
) -> Result<(), IoError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| IoError::generic(dir, e))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let before = found.len();
    found.extend(
        entries
            .iter()
            .filter(|p| p.is_file())
            .filter_map(|p| ManifestInfo::from_path(p)),
    );

    if found.len() > before && !recursive {
        return Ok(());
    }

    for subdir in entries.iter().filter(|p| p.is_dir() && !is_skipped_dir(p)) {
        if let Err(e) = scan_directory(subdir, recursive, found) {
            tracing::warn!(error = %e, "skipping unreadable directory");
        }
    }

    Ok(())
}

fn is_skipped_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };
    name.starts_with('.') || SKIPPED_DIRS.contains(&name) || path.join("pyvenv.cfg").is_file()
}
