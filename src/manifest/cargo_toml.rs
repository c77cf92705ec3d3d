//! Cargo.toml parser for Rust projects
//!
//! Handles:
//! - dependencies
//! - dev-dependencies
//! - build-dependencies
//! - target-specific tables (`[target.'cfg(unix)'.dependencies]`)
//! - Inline table format: { version = "1.0" }
//!
//! Path, git and workspace-inherited entries carry no version and are skipped.

use crate::domain::{Dependency, Language};
use crate::error::ManifestError;
use crate::manifest::{not_updated, rewrite_requirement, ManifestParser};
use crate::parser::{get_parser, VersionParser};
use regex::Regex;
use toml::{Table, Value};

/// Parser for Cargo.toml files
pub struct CargoTomlParser;

const SECTIONS: [(&str, bool); 3] = [
    ("dependencies", false),
    ("dev-dependencies", true),
    ("build-dependencies", true),
];

impl ManifestParser for CargoTomlParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let toml: Table = toml::from_str(content)
            .map_err(|e| ManifestError::toml_parse_error("Cargo.toml", e.to_string()))?;

        let mut dependencies = Vec::new();
        let parser = get_parser(Language::Rust);

        collect_sections(&toml, parser.as_ref(), &mut dependencies);

        if let Some(targets) = toml.get("target").and_then(Value::as_table) {
            for target in targets.values().filter_map(Value::as_table) {
                collect_sections(target, parser.as_ref(), &mut dependencies);
            }
        }

        Ok(dependencies)
    }

    fn language(&self) -> Language {
        Language::Rust
    }

    fn update_version(
        &self,
        content: &str,
        package: &str,
        new_version: &str,
    ) -> Result<String, ManifestError> {
        let parser = get_parser(Language::Rust);
        let name = regex::escape(package);

        let patterns = [
            // serde = "1.0"
            format!(r#"(?m)^\s*"?{name}"?\s*=\s*"(?P<req>[^"]+)""#),
            // serde = { version = "1.0", features = ["derive"] }
            format!(r#"(?m)^\s*"?{name}"?\s*=\s*\{{[^}}\n]*?\bversion\s*=\s*"(?P<req>[^"]+)""#),
            // [dependencies.serde]
            // version = "1.0"
            format!(
                r#"(?m)^\[(?:[^\]\n]*\.)?(?:dependencies|dev-dependencies|build-dependencies)\.{name}\][ \t]*\n(?:[^\[\n][^\n]*\n|\n)*?[ \t]*version\s*=\s*"(?P<req>[^"]+)""#
            ),
        ];

        for pattern in &patterns {
            let re = Regex::new(pattern).map_err(|e| ManifestError::InvalidVersionSpec {
                path: "Cargo.toml".into(),
                spec: package.to_string(),
                message: format!("invalid regex pattern: {}", e),
            })?;
            if let Some(updated) = rewrite_requirement(content, &re, parser.as_ref(), new_version)
            {
                return Ok(updated);
            }
        }

        Err(not_updated("Cargo.toml", package))
    }
}

fn collect_sections(table: &Table, parser: &dyn VersionParser, output: &mut Vec<Dependency>) {
    for (section, is_dev) in SECTIONS {
        if let Some(deps) = table.get(section).and_then(Value::as_table) {
            parse_cargo_dependencies(deps, parser, is_dev, output);
        }
    }
}

fn parse_cargo_dependencies(
    deps: &Table,
    parser: &dyn VersionParser,
    is_dev: bool,
    output: &mut Vec<Dependency>,
) {
    for (name, value) in deps {
        let requirement = match value {
            Value::String(s) => Some(s.as_str()),
            Value::Table(t) => t.get("version").and_then(Value::as_str),
            _ => None,
        };

        let Some(spec) = requirement.and_then(|r| parser.parse(r)) else {
            tracing::debug!(dependency = %name, "skipping Cargo dependency without a version");
            continue;
        };
        output.push(Dependency::new(name.clone(), spec, is_dev, Language::Rust));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionSpecKind;

    fn parse(content: &str) -> Result<Vec<Dependency>, ManifestError> {
        CargoTomlParser.parse(content)
    }

    fn update(content: &str, package: &str, version: &str) -> Result<String, ManifestError> {
        CargoTomlParser.update_version(content, package, version)
    }

    #[test]
    fn test_parse_keeps_declaration_order() {
        let content = r#"
[package]
name = "demo"
version = "0.1.0"

[dependencies]
tokio = { version = "1.28", features = ["full"] }
anyhow = "1.0"
serde = "=1.0.100"

[dev-dependencies]
tempfile = "3"

[build-dependencies]
cc = "1.0"
"#;

        let deps = parse(content).unwrap();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["tokio", "anyhow", "serde", "tempfile", "cc"]);

        assert_eq!(deps[0].version(), "1.28");
        assert_eq!(deps[2].version_spec.kind, VersionSpecKind::Exact);
        assert!(!deps[1].is_dev);
        assert!(deps[3].is_dev);
        assert!(deps[4].is_dev);
    }

    #[test]
    fn test_parse_skips_path_git_and_workspace_entries() {
        let content = r#"
[dependencies]
local = { path = "../local" }
forked = { git = "https://github.com/me/forked" }
shared = { workspace = true }
regex = "1.10"
"#;

        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "regex");
    }

    #[test]
    fn test_parse_target_dependencies() {
        let content = r#"
[target.'cfg(unix)'.dependencies]
libc = "0.2"

[target.'cfg(windows)'.dev-dependencies]
winapi = "0.3"
"#;

        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].name, "libc");
        assert!(!deps[0].is_dev);
        assert!(deps[1].is_dev);
    }

    #[test]
    fn test_parse_no_dependencies() {
        let deps = parse("[package]\nname = \"demo\"\n").unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            parse("[dependencies\nserde = 1"),
            Err(ManifestError::TomlParseError { .. })
        ));
    }

    #[test]
    fn test_update_simple_version() {
        let content = "[dependencies]\nserde = \"1.0\"\n";
        let updated = update(content, "serde", "1.0.228").unwrap();
        assert_eq!(updated, "[dependencies]\nserde = \"1.0.228\"\n");
    }

    #[test]
    fn test_update_preserves_operator_and_table() {
        let content =
            "[dependencies]\ntokio = { version = \"^1.28\", features = [\"full\"] }\n";
        let updated = update(content, "tokio", "1.49.0").unwrap();
        assert_eq!(
            updated,
            "[dependencies]\ntokio = { version = \"^1.49.0\", features = [\"full\"] }\n"
        );
    }

    #[test]
    fn test_update_multiline_table() {
        let content = "[dependencies.reqwest]\nfeatures = [\"json\"]\nversion = \"0.11\"\n";
        let updated = update(content, "reqwest", "0.13.1").unwrap();
        assert!(updated.contains("version = \"0.13.1\""));
        assert!(updated.contains("features = [\"json\"]"));
    }

    #[test]
    fn test_update_does_not_touch_similar_names() {
        let content = "[dependencies]\nserde_json = \"1.0\"\nserde = \"1.0\"\n";
        let updated = update(content, "serde", "1.0.228").unwrap();
        assert_eq!(
            updated,
            "[dependencies]\nserde_json = \"1.0\"\nserde = \"1.0.228\"\n"
        );
    }

    #[test]
    fn test_update_skips_ranges() {
        let content = "[dependencies]\nrand = \">=0.7, <0.9\"\n";
        assert!(update(content, "rand", "0.9.0").is_err());
    }

    #[test]
    fn test_update_not_found() {
        let content = "[dependencies]\nserde = \"1.0\"\n";
        assert!(update(content, "tokio", "1.0.0").is_err());
    }
}
