//! Rewrites absolute image sources inside HTML fragments to mirrored paths.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use futures_util::future::join_all;
use regex::{Captures, Regex};
use tracing::debug;

use super::ImageCacheService;

/// `src="http(s)://..."` with either quote style; group 1 is the URL.
static IMAGE_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src=["'](https?://[^"']+)["']"#).expect("image src pattern is valid")
});

/// Replaces absolute `src` URLs in HTML with their mirrored references.
///
/// Relative and protocol-relative sources are left alone. Only the matched
/// attribute values change; every other byte of the fragment is preserved.
#[derive(Debug, Clone)]
pub struct HtmlImageRewriter {
    cache: Arc<ImageCacheService>,
}

impl HtmlImageRewriter {
    /// Creates a rewriter backed by `cache`.
    #[must_use]
    pub const fn new(cache: Arc<ImageCacheService>) -> Self {
        Self { cache }
    }

    /// Returns the distinct absolute image URLs in `html`, in document order.
    #[must_use]
    pub fn extract_image_urls(html: &str) -> Vec<&str> {
        if !html.contains("src=") {
            return Vec::new();
        }

        let mut urls: Vec<&str> = Vec::new();
        for cap in IMAGE_SRC_RE.captures_iter(html) {
            if let Some(url) = cap.get(1)
                && !urls.contains(&url.as_str())
            {
                urls.push(url.as_str());
            }
        }
        urls
    }

    /// Mirrors every absolute image in `html` and returns the rewritten fragment.
    ///
    /// Each distinct URL is resolved once. URLs that fail to mirror keep
    /// their original value.
    pub async fn rewrite(&self, html: &str) -> String {
        let urls = Self::extract_image_urls(html);
        if urls.is_empty() {
            return html.to_owned();
        }

        let outcomes = join_all(urls.iter().map(|url| self.cache.resolve(url))).await;
        let replacements: HashMap<&str, String> = urls
            .iter()
            .copied()
            .zip(outcomes.into_iter().map(|outcome| outcome.into_reference()))
            .collect();

        debug!(images = replacements.len(), "Rewrote HTML image sources");

        // Substitute by match position rather than by global string
        // replacement, so a URL that is a prefix of another is never touched
        // inside the longer one.
        IMAGE_SRC_RE
            .replace_all(html, |caps: &Captures<'_>| {
                let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) else {
                    return String::new();
                };
                let reference = replacements
                    .get(url.as_str())
                    .map_or(url.as_str(), String::as_str);

                let matched = whole.as_str();
                let start = url.start() - whole.start();
                let end = url.end() - whole.start();
                format!("{}{reference}{}", &matched[..start], &matched[end..])
            })
            .into_owned()
    }
}
