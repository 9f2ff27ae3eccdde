//! HTTP image downloader.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::ImageFetchPort;

use super::USER_AGENT;

/// Default request timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Downloads images with a single GET per call.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> CacheResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::network("", format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> CacheResult<Bytes> {
        debug!(url = %url, "Downloading image");

        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                format!("failed to connect: {e}")
            } else {
                format!("request failed: {e}")
            };
            CacheError::network(url, message)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::status(url, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CacheError::network(url, format!("failed to read body: {e}")))?;

        debug!(url = %url, size = bytes.len(), "Downloaded image");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        assert!(HttpImageFetcher::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)).is_ok());
    }

    #[tokio::test]
    async fn test_malformed_url_is_network_error() {
        let fetcher = HttpImageFetcher::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(err.is_network());
    }
}
