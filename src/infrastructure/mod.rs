//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// JSON export of resolved content.
pub mod export;
/// HTTP adapters for image downloads and the content API.
pub mod http;
/// Local asset stores.
pub mod store;

pub use config::{AppConfig, CliArgs, Command, ConfigError, LogLevel, load_config};
pub use export::{ExportError, write_site_content};
pub use http::{ContentApiClient, HttpImageFetcher};
pub use store::{DiskAssetStore, MemoryAssetStore};
