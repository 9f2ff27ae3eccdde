//! Fetches content records and mirrors their images before rendering.

use std::future::Future;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::services::EntityImageResolver;
use crate::domain::entities::{Attorney, Blog, PracticeArea};
use crate::domain::ports::ContentApiPort;

/// Default number of records resolved concurrently per collection.
pub const DEFAULT_MAX_CONCURRENT_RESOLUTIONS: usize = 8;

/// Every collection the site renders, with images mirrored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteContent {
    /// Attorneys in API order.
    pub attorneys: Vec<Attorney>,
    /// Blog posts in API order.
    pub blogs: Vec<Blog>,
    /// Practice areas in API order.
    pub practice_areas: Vec<PracticeArea>,
}

/// Read side of the site content, with images resolved.
///
/// Upstream failures never propagate: a failed listing yields an empty list
/// and a failed lookup yields `None`, so page generation always proceeds.
#[derive(Clone)]
pub struct ContentCatalog {
    api: Arc<dyn ContentApiPort>,
    resolver: Arc<EntityImageResolver>,
    max_concurrent: usize,
}

impl ContentCatalog {
    /// Creates new catalog.
    #[must_use]
    pub fn new(api: Arc<dyn ContentApiPort>, resolver: Arc<EntityImageResolver>) -> Self {
        Self {
            api,
            resolver,
            max_concurrent: DEFAULT_MAX_CONCURRENT_RESOLUTIONS,
        }
    }

    /// Sets how many records of one collection resolve concurrently.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Lists attorneys with mirrored photos.
    pub async fn attorneys(&self) -> Vec<Attorney> {
        match self.api.list_attorneys().await {
            Ok(records) => {
                resolve_ordered(&records, self.max_concurrent, |a| {
                    self.resolver.resolve_attorney(a)
                })
                .await
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch attorneys");
                Vec::new()
            }
        }
    }

    /// Fetches one attorney with a mirrored photo.
    pub async fn attorney(&self, slug: &str) -> Option<Attorney> {
        match self.api.get_attorney(slug).await {
            Ok(Some(record)) => Some(self.resolver.resolve_attorney(&record).await),
            Ok(None) => {
                debug!(slug, "Attorney not found");
                None
            }
            Err(e) => {
                warn!(slug, error = %e, "Failed to fetch attorney");
                None
            }
        }
    }

    /// Lists blog posts with mirrored images.
    pub async fn blogs(&self) -> Vec<Blog> {
        match self.api.list_blogs().await {
            Ok(records) => {
                resolve_ordered(&records, self.max_concurrent, |b| self.resolver.resolve_blog(b))
                    .await
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch blogs");
                Vec::new()
            }
        }
    }

    /// Fetches one blog post with mirrored images.
    pub async fn blog(&self, slug: &str) -> Option<Blog> {
        match self.api.get_blog(slug).await {
            Ok(Some(record)) => Some(self.resolver.resolve_blog(&record).await),
            Ok(None) => {
                debug!(slug, "Blog not found");
                None
            }
            Err(e) => {
                warn!(slug, error = %e, "Failed to fetch blog");
                None
            }
        }
    }

    /// Lists practice areas with mirrored images.
    pub async fn practice_areas(&self) -> Vec<PracticeArea> {
        match self.api.list_practice_areas().await {
            Ok(records) => {
                resolve_ordered(&records, self.max_concurrent, |p| {
                    self.resolver.resolve_practice_area(p)
                })
                .await
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch practice areas");
                Vec::new()
            }
        }
    }

    /// Fetches one practice area with mirrored images.
    pub async fn practice_area(&self, slug: &str) -> Option<PracticeArea> {
        match self.api.get_practice_area(slug).await {
            Ok(Some(record)) => Some(self.resolver.resolve_practice_area(&record).await),
            Ok(None) => {
                debug!(slug, "Practice area not found");
                None
            }
            Err(e) => {
                warn!(slug, error = %e, "Failed to fetch practice area");
                None
            }
        }
    }

    /// Fetches and resolves every collection concurrently.
    pub async fn snapshot(&self) -> SiteContent {
        let (attorneys, blogs, practice_areas) =
            tokio::join!(self.attorneys(), self.blogs(), self.practice_areas());

        info!(
            attorneys = attorneys.len(),
            blogs = blogs.len(),
            practice_areas = practice_areas.len(),
            "Resolved site content"
        );

        SiteContent {
            attorneys,
            blogs,
            practice_areas,
        }
    }
}

/// Resolves records concurrently, at most `limit` at a time, keeping input
/// order in the output.
///
/// A slot frees as soon as its record finishes, whatever its position, so a
/// stalled record never holds back the ones after it.
async fn resolve_ordered<'a, T, F, Fut>(records: &'a [T], limit: usize, mut resolve: F) -> Vec<T>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = T>,
{
    let mut resolved: Vec<(usize, T)> = stream::iter(records.iter().enumerate())
        .map(|(index, record)| {
            let pending = resolve(record);
            async move { (index, pending.await) }
        })
        .buffer_unordered(limit.max(1))
        .collect()
        .await;

    resolved.sort_unstable_by_key(|(index, _)| *index);
    resolved.into_iter().map(|(_, record)| record).collect()
}
