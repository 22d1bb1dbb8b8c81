//! Stop-name search HTTP client.

use std::time::Duration;

use super::error::SearchError;
use super::types::BusStop;

/// Default base URL for the STCP itinerarium endpoints.
const DEFAULT_BASE_URL: &str = "https://www.stcp.pt/pt/itinerarium";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the search client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL for the upstream (defaults to production STCP)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Create a config with the production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the stop-name search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    /// Create a new search client.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Look up the stops whose name matches `query`.
    pub async fn stops(&self, query: &str) -> Result<Vec<BusStop>, SearchError> {
        let url = format!("{}/callservice.php", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("action", "srchstoplines"), ("stopname", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SearchError::Json {
            message: e.to_string(),
        })
    }
}
