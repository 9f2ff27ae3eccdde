//! HTTP adapters: image downloads and the content API.

pub mod content_client;
pub mod dto;
pub mod image_fetcher;

pub use content_client::{ContentApiClient, DEFAULT_API_URL};
pub use image_fetcher::{DEFAULT_FETCH_TIMEOUT_SECS, HttpImageFetcher};

const USER_AGENT: &str = concat!("lexmirror/", env!("CARGO_PKG_VERSION"));
