//! Application services for the image mirroring pipeline.

pub mod entity_resolver;
pub mod html_rewriter;
pub mod image_cache_service;

pub use entity_resolver::{DEFAULT_API_ORIGIN, EntityImageResolver};
pub use html_rewriter::HtmlImageRewriter;
pub use image_cache_service::ImageCacheService;
