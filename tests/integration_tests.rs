//! Integration tests for libyear
//!
//! These tests verify:
//! - Manifest detection across multiple languages
//! - The full check pipeline against a mock registry
//! - Limits, formatting and manifest updates on real results

use libyear::checker::{Checker, CheckerConfig, CheckerError};
use libyear::domain::{FixedClock, Language, ThresholdEvaluator, Version};
use libyear::manifest::{apply_all_updates, detect_manifests};
use libyear::output::{create_formatter, OutputConfig, OutputFormat};
use libyear::registry::{HttpClient, NpmAdapter, RegistryAdapter};
use chrono::NaiveDate;
use mockito::{Server, ServerGuard};
use std::fs;
use tempfile::TempDir;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

mod manifest_detection {
    use super::*;

    /// Test detection of multiple manifests in a single directory
    #[test]
    fn test_detect_multiple_languages() {
        let temp_dir = create_test_dir();

        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"dependencies": {"lodash": "^4.17.21"}}"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("pyproject.toml"),
            "[project]\nname = \"demo\"\ndependencies = [\"requests>=2.28.0\"]\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\n\n[dependencies]\nserde = \"1.0\"\n",
        )
        .unwrap();

        let manifests = detect_manifests(&[temp_dir.path().to_path_buf()], false).unwrap();
        let languages: Vec<_> = manifests.iter().map(|m| m.language).collect();

        assert_eq!(manifests.len(), 3, "Should detect 3 manifest files");
        assert!(languages.contains(&Language::Node));
        assert!(languages.contains(&Language::Python));
        assert!(languages.contains(&Language::Rust));
    }

    /// Nested manifests are only searched when the root has none or with recursion
    #[test]
    fn test_detect_nested_workspace() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Cargo.toml"), "[workspace]\n").unwrap();
        fs::create_dir_all(temp_dir.path().join("crates/core")).unwrap();
        fs::write(
            temp_dir.path().join("crates/core/Cargo.toml"),
            "[dependencies]\nregex = \"1\"\n",
        )
        .unwrap();
        fs::create_dir_all(temp_dir.path().join("target/debug")).unwrap();
        fs::write(temp_dir.path().join("target/debug/Cargo.toml"), "").unwrap();

        let root = [temp_dir.path().to_path_buf()];
        assert_eq!(detect_manifests(&root, false).unwrap().len(), 1);

        let recursive = detect_manifests(&root, true).unwrap();
        assert_eq!(recursive.len(), 2);
        assert!(recursive
            .iter()
            .all(|m| !m.path.to_string_lossy().contains("target")));
    }
}

mod check_pipeline {
    use super::*;

    const REACT: &str = r#"{
        "time": {
            "created": "2019-01-01T00:00:00.000Z",
            "16.8.0": "2019-02-06T00:00:00.000Z",
            "17.0.0": "2020-10-20T00:00:00.000Z",
            "18.2.0": "2022-06-14T00:00:00.000Z",
            "19.0.0-rc.1": "2024-04-25T00:00:00.000Z"
        },
        "versions": {
            "16.8.0": {},
            "17.0.0": {},
            "18.2.0": {},
            "19.0.0-rc.1": {}
        }
    }"#;

    const LEFT_PAD: &str = r#"{
        "time": {
            "1.1.0": "2016-03-01T00:00:00.000Z",
            "1.3.0": "2016-04-04T00:00:00.000Z"
        },
        "versions": {
            "1.1.0": {},
            "1.3.0": {"deprecated": "use String.prototype.padStart()"}
        }
    }"#;

    async fn npm_server() -> ServerGuard {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/react")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REACT)
            .create_async()
            .await;
        server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LEFT_PAD)
            .create_async()
            .await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;
        server
    }

    fn checker(server: &ServerGuard) -> Checker {
        let client = HttpClient::new().unwrap().with_max_retries(0);
        let adapters: Vec<Box<dyn RegistryAdapter>> =
            vec![Box::new(NpmAdapter::with_base_url(client, server.url()))];
        Checker::with_adapters(CheckerConfig::default(), adapters)
    }

    fn write_project(dir: &TempDir) {
        fs::write(
            dir.path().join("package.json"),
            r#"{
  "name": "demo",
  "dependencies": {
    "react": "^17.0.0",
    "left-pad": "1.1.0"
  },
  "devDependencies": {
    "missing": "~2.0.0"
  }
}
"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_check_against_mock_registry() {
        let server = npm_server().await;
        let dir = create_test_dir();
        write_project(&dir);

        let result = checker(&server)
            .run(&[dir.path().to_path_buf()])
            .await
            .unwrap();

        let project = &result.solution.details[0];
        assert_eq!(project.details.len(), 3);

        // Pre-releases are ignored for a stable declaration
        let react = &project.details[0];
        assert_eq!(react.name, "react");
        assert_eq!(react.latest.as_ref().unwrap().version, Version::new(18, 2, 0));
        assert_eq!(react.days_behind(), 602.0);
        assert_eq!(react.version_distance(), "1.0.0");

        // A deprecated release is never the latest
        let left_pad = &project.details[1];
        assert_eq!(left_pad.days_behind(), 0.0);
        assert_eq!(left_pad.latest.as_ref().unwrap().version, Version::new(1, 1, 0));

        // Unknown packages are reported without a latest release
        let missing = &project.details[2];
        assert!(missing.latest.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0],
            CheckerError::Registry { package, .. } if package == "missing"
        ));
    }

    #[tokio::test]
    async fn test_limits_on_checked_solution() {
        let server = npm_server().await;
        let dir = create_test_dir();
        write_project(&dir);

        let result = checker(&server)
            .run(&[dir.path().to_path_buf()])
            .await
            .unwrap();
        let solution = &result.solution;

        assert!(ThresholdEvaluator::new(Some(1.0), None, None).any_limit_exceeded(solution));
        assert!(ThresholdEvaluator::new(None, Some(1.0), None).any_limit_exceeded(solution));
        assert!(!ThresholdEvaluator::new(Some(2.0), Some(2.0), Some(2.0))
            .any_limit_exceeded(solution));
        assert_eq!(
            ThresholdEvaluator::new(Some(1.0), Some(1.0), Some(1.0))
                .violations(solution)
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_json_output_for_checked_solution() {
        let server = npm_server().await;
        let dir = create_test_dir();
        write_project(&dir);

        let result = checker(&server)
            .run(&[dir.path().to_path_buf()])
            .await
            .unwrap();

        let clock = FixedClock(NaiveDate::from_ymd_opt(2023, 6, 14).unwrap());
        let formatter = create_formatter(&OutputConfig::from_cli(OutputFormat::Json, false, true));
        let mut buffer = Vec::new();
        formatter.format(&result.solution, &clock, &mut buffer).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let react = &json["projects"][0]["dependencies"][0];
        assert_eq!(react["installed"]["date"], "2020-10-20");
        assert_eq!(react["latest"]["version"], "18.2.0");
        assert_eq!(react["pulse"], serde_json::json!(1.0));
        assert_eq!(json["projects"][0]["language"], "Node.js");
    }

    #[tokio::test]
    async fn test_update_rewrites_outdated_requirements() {
        let server = npm_server().await;
        let dir = create_test_dir();
        write_project(&dir);

        let result = checker(&server)
            .run(&[dir.path().to_path_buf()])
            .await
            .unwrap();
        let writes = apply_all_updates(&result.solution);

        assert_eq!(writes.len(), 1);
        assert!(writes[0].file_modified);
        assert_eq!(writes[0].updates_applied, 1);

        let content = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(content.contains(r#""react": "^18.2.0""#));
        assert!(content.contains(r#""left-pad": "1.1.0""#));
        assert!(content.contains(r#""missing": "~2.0.0""#));
        assert!(content.starts_with("{\n  \"name\": \"demo\""));
    }
}
