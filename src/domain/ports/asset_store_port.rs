//! Port definition for the local asset store.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::CacheKey;
use crate::domain::errors::CacheResult;

/// Port for the content-addressed store holding mirrored images.
///
/// Entries are addressed by `key + extension`. Writing an existing entry
/// replaces it; since keys derive from source URLs, concurrent writers of the
/// same entry write identical bytes. Implementations must be thread-safe.
#[async_trait]
pub trait AssetStorePort: Send + Sync {
    /// Returns true if an entry exists for the key and extension.
    async fn exists(&self, key: &CacheKey, extension: &str) -> bool;

    /// Persists the bytes for the key and extension.
    async fn write(&self, key: &CacheKey, extension: &str, bytes: Bytes) -> CacheResult<()>;

    /// Returns the servable path for the key and extension.
    fn public_path(&self, key: &CacheKey, extension: &str) -> String;
}
