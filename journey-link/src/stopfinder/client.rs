//! EFA stop-finder HTTP client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::Stop;

use super::StopFinder;
use super::convert::parse_response;
use super::error::StopFinderError;

/// Default base URL for the stop finder (VRR's EFA instance).
const DEFAULT_BASE_URL: &str = "https://efa.vrr.de/standard";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the stop-finder client.
#[derive(Debug, Clone)]
pub struct StopFinderConfig {
    /// Base URL of the EFA instance, without the request name
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StopFinderConfig {
    /// Create a config pointing at the default EFA instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or another network).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StopFinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the EFA stop-finder service.
///
/// Each call to [`StopFinder::find`] issues exactly one request. There are
/// no retries; callers decide how to surface a failure.
#[derive(Debug, Clone)]
pub struct StopFinderClient {
    http: reqwest::Client,
    base_url: String,
}

impl StopFinderClient {
    /// Create a new stop-finder client.
    pub fn new(config: StopFinderConfig) -> Result<Self, StopFinderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the stop-finder request, without the query.
    pub fn endpoint(&self) -> String {
        format!("{}/XML_STOPFINDER_REQUEST", self.base_url)
    }

    /// Query parameters for a lookup of `address`.
    fn query(address: &str) -> [(&'static str, &str); 5] {
        [
            ("outputFormat", "rapidJSON"),
            ("type_sf", "any"),
            ("name_sf", address),
            ("coordOutputFormat", "WGS84[dd.ddddd]"),
            ("locationServerActive", "1"),
        ]
    }

    async fn fetch(&self, address: &str) -> Result<Vec<Stop>, StopFinderError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&Self::query(address)[..])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StopFinderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

impl StopFinder for StopFinderClient {
    async fn find(&self, address: &str) -> Result<Vec<Stop>, StopFinderError> {
        debug!(address, "stop-finder request");

        match self.fetch(address).await {
            Ok(stops) => {
                debug!(address, count = stops.len(), "stop-finder response");
                Ok(stops)
            }
            Err(e) => {
                warn!(address, error = %e, "stop-finder request failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StopFinderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_builder() {
        let config = StopFinderConfig::new()
            .with_base_url("http://localhost:8080/efa")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:8080/efa");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let config = StopFinderConfig::new().with_base_url("http://localhost:8080/efa/");
        let client = StopFinderClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/efa/XML_STOPFINDER_REQUEST"
        );
    }

    #[test]
    fn query_carries_address_verbatim() {
        let query = StopFinderClient::query("Mergelteichstraße 80, 44225 Dortmund");
        assert!(query.contains(&("name_sf", "Mergelteichstraße 80, 44225 Dortmund")));
        assert!(query.contains(&("outputFormat", "rapidJSON")));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let config = StopFinderConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let client = StopFinderClient::new(config).unwrap();

        let result = client.find("Dortmund Hbf").await;
        assert!(matches!(result, Err(StopFinderError::Http(_))));
    }
}
