//! Port definition for the upstream content API.

use async_trait::async_trait;

use crate::domain::entities::{Attorney, Blog, PracticeArea};
use crate::domain::errors::ApiError;

/// Port for reading site content records.
///
/// Detail lookups return `Ok(None)` when the record does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentApiPort: Send + Sync {
    /// Lists all attorneys.
    async fn list_attorneys(&self) -> Result<Vec<Attorney>, ApiError>;

    /// Fetches one attorney by slug.
    async fn get_attorney(&self, slug: &str) -> Result<Option<Attorney>, ApiError>;

    /// Lists all blog posts.
    async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError>;

    /// Fetches one blog post by slug.
    async fn get_blog(&self, slug: &str) -> Result<Option<Blog>, ApiError>;

    /// Lists all practice areas.
    async fn list_practice_areas(&self) -> Result<Vec<PracticeArea>, ApiError>;

    /// Fetches one practice area by slug.
    async fn get_practice_area(&self, slug: &str) -> Result<Option<PracticeArea>, ApiError>;
}
