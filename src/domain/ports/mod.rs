mod asset_store_port;
mod content_api_port;
mod image_fetch_port;

pub use asset_store_port::AssetStorePort;
pub use content_api_port::ContentApiPort;
pub use image_fetch_port::ImageFetchPort;
