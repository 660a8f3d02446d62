//! HTTP client for the agenda page.
//!
//! One GET per run with a fixed User-Agent. There are no retries: a failed
//! request is reported to the caller as-is.

use reqwest::Client;
use tracing::{debug, trace};

use crate::config::SourceConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// HTTP client bound to a single agenda page.
pub struct AgendaClient {
    client: Client,
    config: SourceConfig,
}

impl AgendaClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: SourceConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ScrapeError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Fetches the page body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, on a non-2xx status, or if
    /// the body cannot be decoded.
    pub async fn fetch(&self) -> ScrapeResult<String> {
        let url = self.config.url_str();
        trace!(url = %url, "Sending request");

        let response = self.client.get(url).send().await.map_err(|e| {
            ScrapeError::network(format!("Request to {} failed: {}", url, e)).with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::http_status(format!("{} returned {}", url, status)));
        }

        let body = response.text().await.map_err(|e| {
            ScrapeError::invalid_response(format!("Failed to read response body: {}", e))
                .with_source(e)
        })?;

        debug!(url = %url, bytes = body.len(), "Fetched agenda page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeErrorCode;
    use std::time::Duration;

    #[test]
    fn client_keeps_config() {
        let config = SourceConfig::new("https://example.com/agenda/")
            .unwrap()
            .with_user_agent("agenda-test/1.0");
        let client = AgendaClient::new(config).unwrap();
        assert_eq!(client.config().url_str(), "https://example.com/agenda/");
        assert_eq!(client.config().user_agent, "agenda-test/1.0");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Port 9 on localhost is closed in any sane test environment.
        let config = SourceConfig::new("http://127.0.0.1:9/agenda/")
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        let client = AgendaClient::new(config).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert_eq!(err.code(), ScrapeErrorCode::Network);
    }

    #[tokio::test]
    async fn error_status_is_http_status_error() {
        let url = crate::test_server::serve_status("503 Service Unavailable").await;
        let config = SourceConfig::new(&url)
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        let client = AgendaClient::new(config).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert_eq!(err.code(), ScrapeErrorCode::HttpStatus);
        assert!(err.to_string().contains("503"));
    }
}
