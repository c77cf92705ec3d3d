//! PyPI JSON API adapter
//!
//! API endpoint: https://pypi.org/pypi/{package}/json
//!
//! A release is dated by its earliest uploaded file and is unlisted when
//! every file has been yanked.

use crate::domain::Language;
use crate::error::RegistryError;
use crate::registry::{sort_versions, HttpClient, PublishedVersion, RegistryAdapter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PyPIResponse {
    #[serde(default)]
    releases: HashMap<String, Vec<ReleaseFile>>,
}

#[derive(Debug, Deserialize)]
struct ReleaseFile {
    upload_time_iso_8601: Option<String>,
    #[serde(default)]
    yanked: bool,
}

impl PyPIAdapter {
    /// Create a new PyPI adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, PYPI_API_URL)
    }

    /// Create an adapter against another PyPI compatible index
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), package)
    }
}

fn to_published(version: String, files: &[ReleaseFile]) -> PublishedVersion {
    let published_at = files
        .iter()
        .filter_map(|f| f.upload_time_iso_8601.as_deref())
        .filter_map(|t| t.parse::<DateTime<Utc>>().ok())
        .min();

    let published = PublishedVersion::new(version, published_at);
    if !files.is_empty() && files.iter().all(|f| f.yanked) {
        published.unlisted()
    } else {
        published
    }
}

#[async_trait]
impl RegistryAdapter for PyPIAdapter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch_versions(&self, package: &str) -> Result<Vec<PublishedVersion>, RegistryError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let mut versions: Vec<PublishedVersion> = response
            .releases
            .into_iter()
            .map(|(version, files)| to_published(version, &files))
            .collect();

        sort_versions(&mut versions);
        tracing::debug!(package, count = versions.len(), "fetched PyPI versions");
        Ok(versions)
    }
}
