//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - 30 second timeout and a `libyear/<version>` User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Retries on network errors, rate limiting and malformed JSON

use crate::error::RegistryError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("libyear/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

/// Outcome of a single failed attempt
enum Failure {
    Retry(RegistryError),
    Fatal(RegistryError),
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// GET `url` and decode the JSON body, retrying transient failures
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let mut attempt = 0;

        loop {
            let error = match self.try_get_json(url, package, registry).await {
                Ok(parsed) => return Ok(parsed),
                Err(Failure::Retry(e)) if attempt < self.max_retries => e,
                Err(Failure::Retry(e)) | Err(Failure::Fatal(e)) => return Err(e),
            };

            let delay = backoff(attempt);
            tracing::debug!(
                url,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying registry request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn try_get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, Failure> {
        let response = self.client.get(url).send().await.map_err(|e| {
            Failure::Retry(if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::network_error(package, registry, e.to_string())
            })
        })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(Failure::Retry(RegistryError::rate_limit_exceeded(registry)))
            }
            StatusCode::NOT_FOUND => {
                return Err(Failure::Fatal(RegistryError::package_not_found(
                    package, registry,
                )))
            }
            status if !status.is_success() => {
                return Err(Failure::Fatal(RegistryError::network_error(
                    package,
                    registry,
                    format!("HTTP {}", status),
                )))
            }
            _ => {}
        }

        response.json::<T>().await.map_err(|e| {
            Failure::Retry(RegistryError::invalid_response(
                package,
                registry,
                format!("failed to parse JSON: {}", e),
            ))
        })
    }
}

/// Delay before retry number `attempt + 1`
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt.min(10))
}
