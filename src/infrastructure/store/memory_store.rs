//! In-memory asset store.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use tracing::trace;

use crate::domain::entities::CacheKey;
use crate::domain::errors::CacheResult;
use crate::domain::ports::AssetStorePort;

use super::disk_store::DEFAULT_PUBLIC_PREFIX;

/// Asset store that keeps entries in memory.
///
/// Resolves public paths exactly like [`super::DiskAssetStore`], which makes
/// it a drop-in replacement for dry runs and tests.
#[derive(Debug)]
pub struct MemoryAssetStore {
    entries: RwLock<HashMap<String, Bytes>>,
    public_prefix: String,
}

impl MemoryAssetStore {
    /// Creates an empty store served under `public_prefix`.
    #[must_use]
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            public_prefix: public_prefix.into(),
        }
    }

    /// Returns the stored bytes for an entry.
    #[must_use]
    pub fn get(&self, key: &CacheKey, extension: &str) -> Option<Bytes> {
        self.entries.read().get(&key.file_name(extension)).cloned()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryAssetStore {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PREFIX)
    }
}

#[async_trait]
impl AssetStorePort for MemoryAssetStore {
    async fn exists(&self, key: &CacheKey, extension: &str) -> bool {
        self.entries.read().contains_key(&key.file_name(extension))
    }

    async fn write(&self, key: &CacheKey, extension: &str, bytes: Bytes) -> CacheResult<()> {
        trace!(key = %key, size = bytes.len(), "Stored image in memory store");
        self.entries.write().insert(key.file_name(extension), bytes);
        Ok(())
    }

    fn public_path(&self, key: &CacheKey, extension: &str) -> String {
        format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            key.file_name(extension)
        )
    }
}
