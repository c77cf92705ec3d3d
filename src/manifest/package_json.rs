//! package.json parser for Node.js projects
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - optionalDependencies

use crate::domain::{Dependency, Language};
use crate::error::ManifestError;
use crate::manifest::{not_updated, rewrite_requirement, ManifestParser};
use crate::parser::{get_parser, VersionParser};
use regex::Regex;
use serde_json::{Map, Value};

/// Parser for package.json files
pub struct PackageJsonParser;

const SECTIONS: [(&str, bool); 4] = [
    ("dependencies", false),
    ("devDependencies", true),
    ("peerDependencies", false),
    ("optionalDependencies", false),
];

impl ManifestParser for PackageJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error("package.json", e.to_string()))?;

        let mut dependencies = Vec::new();
        let parser = get_parser(Language::Node);

        for (section, is_dev) in SECTIONS {
            if let Some(deps) = json.get(section).and_then(Value::as_object) {
                parse_dependency_object(deps, parser.as_ref(), is_dev, &mut dependencies);
            }
        }

        Ok(dependencies)
    }

    fn language(&self) -> Language {
        Language::Node
    }

    fn update_version(
        &self,
        content: &str,
        package: &str,
        new_version: &str,
    ) -> Result<String, ManifestError> {
        let parser = get_parser(Language::Node);

        // Text replacement keeps key order, indentation and trailing newline
        let pattern = format!(r#""{}"\s*:\s*"(?P<req>[^"]+)""#, regex::escape(package));
        let re = Regex::new(&pattern).map_err(|e| ManifestError::InvalidVersionSpec {
            path: "package.json".into(),
            spec: package.to_string(),
            message: format!("invalid regex pattern: {}", e),
        })?;

        rewrite_requirement(content, &re, parser.as_ref(), new_version)
            .ok_or_else(|| not_updated("package.json", package))
    }
}

fn parse_dependency_object(
    deps: &Map<String, Value>,
    parser: &dyn VersionParser,
    is_dev: bool,
    output: &mut Vec<Dependency>,
) {
    for (name, value) in deps {
        match value.as_str().and_then(|v| parser.parse(v)) {
            Some(spec) => output.push(Dependency::new(name.clone(), spec, is_dev, Language::Node)),
            None => tracing::debug!(dependency = %name, "skipping npm dependency without a version"),
        }
    }
}
