//! crates.io API adapter
//!
//! API endpoint: https://crates.io/api/v1/crates/{crate}
//!
//! crates.io asks clients to send a User-Agent (handled by HttpClient) and
//! to stay under one request per second.

use crate::domain::Language;
use crate::error::RegistryError;
use crate::registry::{sort_versions, HttpClient, PublishedVersion, RegistryAdapter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// crates.io API base URL
const CRATES_IO_API_URL: &str = "https://crates.io/api/v1/crates";

/// Rate limit: 1 request per second
const RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(1);

/// crates.io adapter with rate limiting
pub struct CratesIoAdapter {
    client: HttpClient,
    base_url: String,
    last_request: Mutex<Option<Instant>>,
}

#[derive(Debug, Deserialize)]
struct CratesIoResponse {
    versions: Vec<CrateVersion>,
}

#[derive(Debug, Deserialize)]
struct CrateVersion {
    num: String,
    created_at: String,
    #[serde(default)]
    yanked: bool,
}

impl CratesIoAdapter {
    /// Create a new crates.io adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, CRATES_IO_API_URL)
    }

    /// Create an adapter against another crates.io compatible API
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            last_request: Mutex::new(None),
        }
    }

    fn build_url(&self, crate_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), crate_name)
    }

    /// Wait until at least [`RATE_LIMIT_INTERVAL`] has passed since the previous request
    async fn apply_rate_limit(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < RATE_LIMIT_INTERVAL {
                tokio::time::sleep(RATE_LIMIT_INTERVAL - elapsed).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

#[async_trait]
impl RegistryAdapter for CratesIoAdapter {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn registry_name(&self) -> &'static str {
        "crates.io"
    }

    async fn fetch_versions(&self, crate_name: &str) -> Result<Vec<PublishedVersion>, RegistryError> {
        self.apply_rate_limit().await;

        let url = self.build_url(crate_name);
        let response: CratesIoResponse = self
            .client
            .get_json(&url, crate_name, self.registry_name())
            .await?;

        let mut versions: Vec<PublishedVersion> = response
            .versions
            .into_iter()
            .map(|v| {
                let published_at = v.created_at.parse::<DateTime<Utc>>().ok();
                let version = PublishedVersion::new(v.num, published_at);
                if v.yanked {
                    version.unlisted()
                } else {
                    version
                }
            })
            .collect();

        sort_versions(&mut versions);
        tracing::debug!(crate_name, count = versions.len(), "fetched crates.io versions");
        Ok(versions)
    }
}
