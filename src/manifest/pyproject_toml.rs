//! pyproject.toml parser for Python projects
//!
//! Handles:
//! - project.dependencies (PEP 621)
//! - project.optional-dependencies (PEP 621)
//! - tool.poetry.dependencies (Poetry)
//! - tool.poetry.dev-dependencies (Poetry)
//! - tool.poetry.group.<name>.dependencies (Poetry 1.2+)

use crate::domain::{Dependency, Language};
use crate::error::ManifestError;
use crate::manifest::{not_updated, rewrite_requirement, ManifestParser};
use crate::parser::{get_parser, VersionParser};
use regex::Regex;
use std::sync::LazyLock;
use toml::{Table, Value};

/// Parser for pyproject.toml files
pub struct PyprojectTomlParser;

// name, optional extras, optional parenthesized requirement, optional markers.
// Direct URL references (`name @ https://...`) do not match.
static PEP508_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<name>[A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*\(?(?P<req>[^;@()]*?)\)?\s*(?:;.*)?$",
    )
    .unwrap()
});

impl ManifestParser for PyprojectTomlParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let toml: Table = toml::from_str(content)
            .map_err(|e| ManifestError::toml_parse_error("pyproject.toml", e.to_string()))?;

        let mut dependencies = Vec::new();
        let parser = get_parser(Language::Python);
        let project = toml.get("project");

        if let Some(deps) = project
            .and_then(|p| p.get("dependencies"))
            .and_then(Value::as_array)
        {
            parse_pep508_array(deps, parser.as_ref(), &mut dependencies);
        }

        if let Some(optional) = project
            .and_then(|p| p.get("optional-dependencies"))
            .and_then(Value::as_table)
        {
            for deps in optional.values().filter_map(Value::as_array) {
                parse_pep508_array(deps, parser.as_ref(), &mut dependencies);
            }
        }

        let poetry = toml.get("tool").and_then(|t| t.get("poetry"));

        if let Some(deps) = poetry
            .and_then(|p| p.get("dependencies"))
            .and_then(Value::as_table)
        {
            parse_poetry_table(deps, parser.as_ref(), false, &mut dependencies);
        }

        if let Some(deps) = poetry
            .and_then(|p| p.get("dev-dependencies"))
            .and_then(Value::as_table)
        {
            parse_poetry_table(deps, parser.as_ref(), true, &mut dependencies);
        }

        if let Some(groups) = poetry
            .and_then(|p| p.get("group"))
            .and_then(Value::as_table)
        {
            for (group_name, group) in groups {
                let is_dev = matches!(group_name.as_str(), "dev" | "test" | "docs" | "lint");
                if let Some(deps) = group.get("dependencies").and_then(Value::as_table) {
                    parse_poetry_table(deps, parser.as_ref(), is_dev, &mut dependencies);
                }
            }
        }

        Ok(dependencies)
    }

    fn language(&self) -> Language {
        Language::Python
    }

    fn update_version(
        &self,
        content: &str,
        package: &str,
        new_version: &str,
    ) -> Result<String, ManifestError> {
        let parser = get_parser(Language::Python);
        let toml_key = regex::escape(package);
        let pep508_name = normalized_name_pattern(package);

        let patterns = [
            // requests = "^2.28"
            format!(r#"(?m)^\s*"?{toml_key}"?\s*=\s*"(?P<req>[^"]+)""#),
            // requests = { version = "^2.28", extras = ["socks"] }
            format!(r#"(?m)^\s*"?{toml_key}"?\s*=\s*\{{[^}}\n]*?\bversion\s*=\s*"(?P<req>[^"]+)""#),
            // "requests[socks]>=2.28; python_version >= '3.8'"
            format!(
                r#"(?i)"{pep508_name}(?:\[[^\]]*\])?\s*\(?(?P<req>[<>=!~^][^";)]*?)\s*\)?\s*(?:;[^"]*)?""#
            ),
        ];

        for pattern in &patterns {
            let re = Regex::new(pattern).map_err(|e| ManifestError::InvalidVersionSpec {
                path: "pyproject.toml".into(),
                spec: package.to_string(),
                message: format!("invalid regex pattern: {}", e),
            })?;
            if let Some(updated) = rewrite_requirement(content, &re, parser.as_ref(), new_version)
            {
                return Ok(updated);
            }
        }

        Err(not_updated("pyproject.toml", package))
    }
}

/// Regex for a package name where `-`, `_` and `.` are interchangeable
fn normalized_name_pattern(package: &str) -> String {
    package
        .split(['-', '_', '.'])
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("[-_.]")
}

fn parse_pep508_array(deps: &[Value], parser: &dyn VersionParser, output: &mut Vec<Dependency>) {
    for requirement in deps.iter().filter_map(Value::as_str) {
        match parse_pep508_dependency(requirement, parser) {
            Some(dep) => output.push(dep),
            None => tracing::debug!(requirement, "skipping PEP 508 requirement without a version"),
        }
    }
}

fn parse_pep508_dependency(requirement: &str, parser: &dyn VersionParser) -> Option<Dependency> {
    let caps = PEP508_RE.captures(requirement)?;
    let name = caps.name("name")?.as_str();
    let spec = parser.parse(caps.name("req")?.as_str())?;
    Some(Dependency::production(name, spec, Language::Python))
}

fn parse_poetry_table(
    deps: &Table,
    parser: &dyn VersionParser,
    is_dev: bool,
    output: &mut Vec<Dependency>,
) {
    for (name, value) in deps {
        if name == "python" {
            continue;
        }

        let requirement = match value {
            Value::String(s) => Some(s.as_str()),
            Value::Table(t) => t.get("version").and_then(Value::as_str),
            _ => None,
        };

        match requirement.and_then(|r| parser.parse(r)) {
            Some(spec) => output.push(Dependency::new(name.clone(), spec, is_dev, Language::Python)),
            None => tracing::debug!(dependency = %name, "skipping Poetry dependency without a version"),
        }
    }
}
