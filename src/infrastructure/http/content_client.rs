//! Content API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::USER_AGENT;
use super::dto::Listing;
use crate::domain::entities::{Attorney, Blog, PracticeArea};
use crate::domain::errors::ApiError;
use crate::domain::ports::ContentApiPort;

/// Default content API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// REST client for the site's content API.
#[derive(Debug, Clone)]
pub struct ContentApiClient {
    client: Client,
    base_url: String,
}

impl ContentApiClient {
    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` and decodes the body, mapping 404 to `None`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Requesting content API");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to reach content API");
            if e.is_timeout() {
                ApiError::network(&url, "request timed out")
            } else if e.is_connect() {
                ApiError::network(&url, "failed to connect to content API")
            } else {
                ApiError::network(&url, e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: url,
                status: status.as_u16(),
            });
        }

        let body = response.json::<T>().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse content API response");
            ApiError::decode(&url, e.to_string())
        })?;

        Ok(Some(body))
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        match self.get_json::<Listing<T>>(path).await? {
            Some(listing) => Ok(listing.into_records()),
            None => Err(ApiError::Status {
                endpoint: self.endpoint(path),
                status: StatusCode::NOT_FOUND.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl ContentApiPort for ContentApiClient {
    async fn list_attorneys(&self) -> Result<Vec<Attorney>, ApiError> {
        self.list("attorneys/").await
    }

    async fn get_attorney(&self, slug: &str) -> Result<Option<Attorney>, ApiError> {
        self.get_json(&format!("attorneys/{slug}/")).await
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.list("blogs/").await
    }

    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, ApiError> {
        self.get_json(&format!("blogs/{slug}/")).await
    }

    async fn list_practice_areas(&self) -> Result<Vec<PracticeArea>, ApiError> {
        self.list("practice-areas/").await
    }

    async fn get_practice_area(&self, slug: &str) -> Result<Option<PracticeArea>, ApiError> {
        self.get_json(&format!("practice-areas/{slug}/")).await
    }
}
