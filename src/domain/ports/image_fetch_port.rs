//! Port definition for downloading remote images.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::CacheResult;

/// Port for fetching remote image bytes.
///
/// Implementations make exactly one attempt per call. A non-success status
/// is an error, never an empty body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Downloads the body at `url`.
    async fn fetch(&self, url: &str) -> CacheResult<Bytes>;
}
