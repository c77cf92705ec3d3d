//! Runs a libyear check end to end
//!
//! Workflow: detect manifests → parse dependencies → fetch published
//! versions → resolve releases → aggregate.
//!
//! All dependencies of a manifest are fetched concurrently. Results keep
//! declaration order. Requests are bounded by a semaphore per registry
//! class, with crates.io limited to one request at a time.

use crate::domain::{Dependency, DependencyResult, Language, ProjectAggregate, SolutionAggregate};
use crate::error::{AppError, ManifestError, RegistryError};
use crate::manifest::{detect_manifests, parse_manifest, ManifestInfo};
use crate::progress::Progress;
use crate::registry::{create_adapter, HttpClient, PublishedVersion, RegistryAdapter};
use crate::resolver::{declared_version, resolve, unresolved};
use futures::future::join_all;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Default concurrency limit for registry requests
const DEFAULT_CONCURRENCY: usize = 10;

/// Concurrency limit for crates.io (rate limited)
const CRATES_IO_CONCURRENCY: usize = 1;

/// Configuration for the checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Maximum concurrent requests for npm and PyPI
    pub general_concurrency: usize,
    /// Maximum concurrent requests for crates.io
    pub crates_io_concurrency: usize,
    /// Search subdirectories even when a directory has a manifest
    pub recursive: bool,
    /// Show a progress bar while fetching
    pub show_progress: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            general_concurrency: DEFAULT_CONCURRENCY,
            crates_io_concurrency: CRATES_IO_CONCURRENCY,
            recursive: false,
            show_progress: false,
        }
    }
}

/// Problems that did not stop the run
#[derive(Error, Debug)]
pub enum CheckerError {
    /// A manifest could not be read or parsed and was skipped
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A registry lookup failed; the dependency is reported without a latest release
    #[error("{source}")]
    Registry {
        package: String,
        #[source]
        source: RegistryError,
    },
}

/// Result of a libyear run
#[derive(Debug)]
pub struct CheckerResult {
    /// Aggregated results, one project per parsed manifest
    pub solution: SolutionAggregate,
    /// Soft errors collected along the way
    pub errors: Vec<CheckerError>,
}

/// Coordinates discovery, registry lookups and aggregation
pub struct Checker {
    config: CheckerConfig,
    adapters: Vec<Box<dyn RegistryAdapter>>,
    general_semaphore: Semaphore,
    crates_io_semaphore: Semaphore,
}

impl Checker {
    /// Create a checker talking to the public registries
    pub fn new(config: CheckerConfig) -> Result<Self, RegistryError> {
        let client = HttpClient::new()?;
        let adapters = Language::all()
            .iter()
            .map(|language| create_adapter(*language, client.clone()))
            .collect();
        Ok(Self::with_adapters(config, adapters))
    }

    /// Create a checker with custom registry adapters
    pub fn with_adapters(config: CheckerConfig, adapters: Vec<Box<dyn RegistryAdapter>>) -> Self {
        Self {
            general_semaphore: Semaphore::new(config.general_concurrency.max(1)),
            crates_io_semaphore: Semaphore::new(config.crates_io_concurrency.max(1)),
            config,
            adapters,
        }
    }

    /// Check every manifest found under `paths`
    ///
    /// Fails only when the paths themselves are unusable. Manifest and
    /// registry problems are collected in [`CheckerResult::errors`].
    pub async fn run(&self, paths: &[PathBuf]) -> Result<CheckerResult, AppError> {
        let mut progress = Progress::new(self.config.show_progress);
        let mut errors = Vec::new();

        progress.spinner("Detecting manifest files...");
        let manifests = detect_manifests(paths, self.config.recursive)?;
        progress.finish_and_clear();

        let mut parsed: Vec<(ManifestInfo, Vec<Dependency>)> = Vec::new();
        for info in manifests {
            match parse_manifest(&info.path) {
                Ok(dependencies) => {
                    tracing::debug!(
                        manifest = %info.path.display(),
                        dependencies = dependencies.len(),
                        "parsed manifest"
                    );
                    parsed.push((info, dependencies));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping manifest");
                    errors.push(CheckerError::Manifest(e));
                }
            }
        }

        let total: usize = parsed.iter().map(|(_, deps)| deps.len()).sum();
        progress.start(total as u64, "Checking dependencies");

        let mut projects = Vec::with_capacity(parsed.len());
        for (info, dependencies) in parsed {
            let checks = dependencies
                .iter()
                .map(|dep| self.check_dependency(info.language, dep, &progress));

            let mut details = Vec::with_capacity(dependencies.len());
            for (result, error) in join_all(checks).await {
                details.extend(result);
                errors.extend(error);
            }

            projects.push(ProjectAggregate::new(info.path, info.language, details));
        }
        progress.finish_and_clear();

        Ok(CheckerResult {
            solution: SolutionAggregate::new(projects),
            errors,
        })
    }

    async fn check_dependency(
        &self,
        language: Language,
        dependency: &Dependency,
        progress: &Progress,
    ) -> (Option<DependencyResult>, Option<CheckerError>) {
        let outcome = match declared_version(dependency) {
            Some(declared) => match self.fetch(language, &dependency.name).await {
                Ok(published) => (Some(resolve(dependency, declared, &published)), None),
                Err(e) => {
                    tracing::warn!(dependency = %dependency.name, error = %e, "registry lookup failed");
                    (
                        Some(unresolved(dependency, declared)),
                        Some(CheckerError::Registry {
                            package: dependency.name.clone(),
                            source: e,
                        }),
                    )
                }
            },
            None => (None, None),
        };

        progress.inc();
        outcome
    }

    async fn fetch(
        &self,
        language: Language,
        package: &str,
    ) -> Result<Vec<PublishedVersion>, RegistryError> {
        let adapter = self
            .adapters
            .iter()
            .find(|adapter| adapter.language() == language)
            .ok_or_else(|| {
                RegistryError::network_error(
                    package,
                    language.registry_name(),
                    "no registry adapter configured",
                )
            })?;

        let semaphore = if language == Language::Rust {
            &self.crates_io_semaphore
        } else {
            &self.general_semaphore
        };
        // The semaphores are never closed
        let _permit = semaphore.acquire().await.ok();

        adapter.fetch_versions(package).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Release, Version};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::HashMap;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Registry serving a fixed set of packages
    struct FakeRegistry {
        language: Language,
        packages: HashMap<&'static str, Vec<PublishedVersion>>,
        calls: AtomicUsize,
    }

    impl FakeRegistry {
        fn npm(packages: &[(&'static str, &[(&str, i32)])]) -> Self {
            let packages = packages
                .iter()
                .map(|(name, versions)| {
                    let versions = versions
                        .iter()
                        .map(|(version, year)| {
                            PublishedVersion::new(
                                *version,
                                Some(Utc.with_ymd_and_hms(*year, 1, 1, 0, 0, 0).unwrap()),
                            )
                        })
                        .collect();
                    (*name, versions)
                })
                .collect();
            Self {
                language: Language::Node,
                packages,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RegistryAdapter for FakeRegistry {
        fn language(&self) -> Language {
            self.language
        }

        fn registry_name(&self) -> &'static str {
            "fake"
        }

        async fn fetch_versions(
            &self,
            package: &str,
        ) -> Result<Vec<PublishedVersion>, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.packages
                .get(package)
                .cloned()
                .ok_or_else(|| RegistryError::package_not_found(package, "fake"))
        }
    }

    fn write_package_json(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("package.json");
        fs::write(&path, content).unwrap();
        path
    }

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
    }

    #[test]
    fn test_checker_config_default() {
        let config = CheckerConfig::default();
        assert_eq!(config.general_concurrency, 10);
        assert_eq!(config.crates_io_concurrency, 1);
        assert!(!config.recursive);
    }

    #[tokio::test]
    async fn test_run_resolves_dependencies_in_order() {
        let dir = TempDir::new().unwrap();
        let manifest = write_package_json(
            &dir,
            r#"{"dependencies": {"react": "^17.0.0", "lodash": "4.17.21", "anything": "*"}}"#,
        );
        let registry = FakeRegistry::npm(&[
            ("react", &[("17.0.0", 2020), ("18.0.0", 2022)]),
            ("lodash", &[("4.17.21", 2021)]),
        ]);

        let checker = Checker::with_adapters(CheckerConfig::default(), vec![Box::new(registry)]);
        let result = checker.run(&[dir.path().to_path_buf()]).await.unwrap();

        assert!(result.errors.is_empty());
        assert_eq!(result.solution.details.len(), 1);

        let project = &result.solution.details[0];
        assert_eq!(project.manifest, manifest);
        assert_eq!(project.language, Language::Node);

        let names: Vec<&str> = project.details.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["react", "lodash"]);

        let react = &project.details[0];
        assert_eq!(react.installed.as_ref().unwrap().date, date(2020));
        assert_eq!(react.latest.as_ref().unwrap().version, Version::new(18, 0, 0));
        assert_eq!(react.days_behind(), 731.0);
        assert_eq!(project.details[1].days_behind(), 0.0);
    }

    #[tokio::test]
    async fn test_run_collects_registry_errors() {
        let dir = TempDir::new().unwrap();
        write_package_json(&dir, r#"{"dependencies": {"ghost": "1.2.3"}}"#);

        let checker = Checker::with_adapters(
            CheckerConfig::default(),
            vec![Box::new(FakeRegistry::npm(&[]))],
        );
        let result = checker.run(&[dir.path().to_path_buf()]).await.unwrap();

        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors[0],
            CheckerError::Registry { ref package, .. } if package == "ghost"
        ));

        let ghost = &result.solution.details[0].details[0];
        assert_eq!(
            ghost.installed,
            Some(Release::undated(Version::new(1, 2, 3)))
        );
        assert!(ghost.latest.is_none());
    }

    #[tokio::test]
    async fn test_run_skips_unparsable_manifest() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("broken")).unwrap();
        fs::write(dir.path().join("broken/package.json"), "{ nope").unwrap();
        fs::create_dir(dir.path().join("ok")).unwrap();
        fs::write(dir.path().join("ok/package.json"), "{}").unwrap();

        let checker = Checker::with_adapters(
            CheckerConfig::default(),
            vec![Box::new(FakeRegistry::npm(&[]))],
        );
        let result = checker.run(&[dir.path().to_path_buf()]).await.unwrap();

        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], CheckerError::Manifest(_)));
        assert_eq!(result.solution.details.len(), 1);
        assert!(result.solution.details[0].is_empty());
    }

    #[tokio::test]
    async fn test_run_without_manifests() {
        let dir = TempDir::new().unwrap();
        let checker = Checker::with_adapters(CheckerConfig::default(), Vec::new());
        let result = checker.run(&[dir.path().to_path_buf()]).await.unwrap();
        assert!(result.solution.is_empty());
    }

    #[tokio::test]
    async fn test_run_missing_adapter_is_soft() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[dependencies]\nserde = \"1.0\"\n",
        )
        .unwrap();

        let checker = Checker::with_adapters(CheckerConfig::default(), Vec::new());
        let result = checker.run(&[dir.path().to_path_buf()]).await.unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.solution.total_dependencies(), 1);
    }

    #[tokio::test]
    async fn test_run_missing_path_is_fatal() {
        let dir = TempDir::new().unwrap();
        let checker = Checker::with_adapters(CheckerConfig::default(), Vec::new());
        assert!(checker
            .run(&[dir.path().join("does-not-exist")])
            .await
            .is_err());
    }
}
