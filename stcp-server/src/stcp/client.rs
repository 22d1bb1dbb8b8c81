//! STCP arrivals page HTTP client.

use std::time::Duration;

use crate::arrivals::{FetchArrivals, StopCode};

use super::error::StcpError;

/// Default base URL for the STCP itinerarium endpoints.
const DEFAULT_BASE_URL: &str = "https://www.stcp.pt/pt/itinerarium";

/// Default request timeout in seconds. Bounds how long one handler can
/// stall on a slow upstream.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the STCP client.
#[derive(Debug, Clone)]
pub struct StcpConfig {
    /// Base URL for the upstream (defaults to production STCP)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StcpConfig {
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

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StcpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the STCP arrivals page.
#[derive(Debug, Clone)]
pub struct StcpClient {
    http: reqwest::Client,
    base_url: String,
}

impl StcpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StcpConfig) -> Result<Self, StcpError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the live arrivals page for a stop.
    ///
    /// The stop code goes into the query string as-is (URL-encoded by the
    /// transport); no status interpretation happens beyond success or not.
    pub async fn arrivals_page(&self, stop: &StopCode) -> Result<String, StcpError> {
        let url = format!("{}/soapclient.php", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("codigo", stop.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StcpError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

impl FetchArrivals for StcpClient {
    async fn fetch(&self, stop: &StopCode) -> Result<String, StcpError> {
        self.arrivals_page(stop).await
    }
}
