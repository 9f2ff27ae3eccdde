//! Domain layer with core entities, pure services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{Attorney, Blog, CacheKey, CacheOutcome, CachedAsset, PracticeArea};
pub use errors::{ApiError, CacheError, CacheResult};
pub use ports::{AssetStorePort, ContentApiPort, ImageFetchPort};
