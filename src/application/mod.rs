//! Application layer: the mirroring pipeline and the use cases built on it.

/// Pipeline services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{EntityImageResolver, HtmlImageRewriter, ImageCacheService};
pub use use_cases::{ContentCatalog, SiteContent};
