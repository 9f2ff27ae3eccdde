//! Per-record image resolution.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::debug;

use super::{HtmlImageRewriter, ImageCacheService};
use crate::domain::entities::{Attorney, Blog, PracticeArea};

/// Default origin prefixed to host-relative media paths.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";

/// Rewrites every image-bearing field of a content record.
///
/// Resolvers never mutate their input: they resolve image fields through the
/// cache and HTML fields through the rewriter, then return a copy with only
/// those fields replaced. Absent or empty fields are left as they are.
#[derive(Debug, Clone)]
pub struct EntityImageResolver {
    cache: Arc<ImageCacheService>,
    rewriter: HtmlImageRewriter,
    api_origin: String,
}

impl EntityImageResolver {
    /// Creates a resolver; `api_origin` prefixes host-relative media paths.
    #[must_use]
    pub fn new(cache: Arc<ImageCacheService>, api_origin: impl Into<String>) -> Self {
        Self {
            rewriter: HtmlImageRewriter::new(cache.clone()),
            cache,
            api_origin: api_origin.into(),
        }
    }

    /// Resolves the attorney's photo.
    pub async fn resolve_attorney(&self, attorney: &Attorney) -> Attorney {
        let mut resolved = attorney.clone();
        if let Some(url) = self.mirror(attorney.photo_url()).await {
            resolved.set_photo_url(url);
        }
        debug!(slug = attorney.slug(), "Resolved attorney images");
        resolved
    }

    /// Resolves the blog's featured image and the images in its content.
    pub async fn resolve_blog(&self, blog: &Blog) -> Blog {
        let (featured, content) = tokio::join!(
            self.mirror(blog.featured_image()),
            self.rewrite(blog.content()),
        );

        let mut resolved = blog.clone();
        if let Some(url) = featured {
            resolved.set_featured_image(url);
        }
        if let Some(html) = content {
            resolved.set_content(html);
        }
        debug!(slug = blog.slug(), "Resolved blog images");
        resolved
    }

    /// Resolves the featured image, the description images and every gallery
    /// entry. Gallery length and order are preserved.
    pub async fn resolve_practice_area(&self, area: &PracticeArea) -> PracticeArea {
        let gallery = area.gallery_image_urls();
        let (featured, description, gallery) = tokio::join!(
            self.mirror_media(area.featured_image_url()),
            self.rewrite(area.description()),
            join_all(gallery.into_iter().map(|path| self.mirror_media(path))),
        );

        let mut resolved = area.clone();
        if let Some(url) = featured {
            resolved.set_featured_image_url(url);
        }
        if let Some(html) = description {
            resolved.set_description(html);
        }
        for (index, url) in gallery.into_iter().enumerate() {
            if let Some(url) = url {
                resolved.set_gallery_image_url(index, url);
            }
        }
        debug!(slug = area.slug(), "Resolved practice area images");
        resolved
    }

    /// Makes a host-relative media path absolute against the API origin.
    #[must_use]
    pub fn absolutize(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.api_origin.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn mirror(&self, url: Option<&str>) -> Option<String> {
        self.cache.cache_image(url).await
    }

    async fn mirror_media(&self, path: Option<&str>) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        let url = self.absolutize(path);
        Some(self.cache.resolve(&url).await.into_reference())
    }

    async fn rewrite(&self, html: Option<&str>) -> Option<String> {
        let html = html.filter(|h| !h.is_empty())?;
        Some(self.rewriter.rewrite(html).await)
    }
}
