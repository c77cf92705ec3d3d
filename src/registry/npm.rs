//! npm Registry adapter
//!
//! API endpoint: https://registry.npmjs.org/{package}
//!
//! Publication times come from the `time` map. Deprecated versions are
//! reported as unlisted.

use crate::domain::Language;
use crate::error::RegistryError;
use crate::registry::{sort_versions, HttpClient, PublishedVersion, RegistryAdapter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// npm registry base URL
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(default)]
    time: HashMap<String, String>,
    #[serde(default)]
    versions: Map<String, Value>,
}

impl NpmAdapter {
    /// Create a new npm adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create an adapter against another npm compatible registry
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the URL for a package; the scope separator is percent-encoded
    fn build_url(&self, package: &str) -> String {
        let encoded = if package.starts_with('@') {
            package.replacen('/', "%2F", 1)
        } else {
            package.to_string()
        };
        format!("{}/{}", self.base_url.trim_end_matches('/'), encoded)
    }
}

fn is_deprecated(manifest: &Value) -> bool {
    match manifest.get("deprecated") {
        Some(Value::String(message)) => !message.is_empty(),
        Some(Value::Bool(flag)) => *flag,
        _ => false,
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn language(&self) -> Language {
        Language::Node
    }

    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_versions(&self, package: &str) -> Result<Vec<PublishedVersion>, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let mut versions: Vec<PublishedVersion> = response
            .versions
            .iter()
            .map(|(version, manifest)| {
                let published_at = response
                    .time
                    .get(version)
                    .and_then(|t| t.parse::<DateTime<Utc>>().ok());
                let published = PublishedVersion::new(version.clone(), published_at);
                if is_deprecated(manifest) {
                    published.unlisted()
                } else {
                    published
                }
            })
            .collect();

        sort_versions(&mut versions);
        tracing::debug!(package, count = versions.len(), "fetched npm versions");
        Ok(versions)
    }
}
