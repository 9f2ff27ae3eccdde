//! Use case implementations.

mod content_catalog;

pub use content_catalog::{ContentCatalog, DEFAULT_MAX_CONCURRENT_RESOLUTIONS, SiteContent};
