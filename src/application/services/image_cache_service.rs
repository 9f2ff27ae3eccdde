//! Mirrors remote images into the local asset store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::domain::entities::{CacheKey, CacheOutcome, CachedAsset};
use crate::domain::ports::{AssetStorePort, ImageFetchPort};
use crate::domain::services::{compute_key, extension_of};

/// Mirrors remote image URLs, falling back to the remote URL on any failure.
///
/// A URL is downloaded at most once: after the first successful write every
/// call is answered from the store. With single-flight enabled (the default),
/// concurrent calls for the same uncached URL wait for each other and only
/// the first one downloads.
pub struct ImageCacheService {
    fetcher: Arc<dyn ImageFetchPort>,
    store: Arc<dyn AssetStorePort>,
    key_locks: Option<KeyLocks>,
}

impl std::fmt::Debug for ImageCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCacheService")
            .field("single_flight", &self.key_locks.is_some())
            .finish_non_exhaustive()
    }
}

impl ImageCacheService {
    /// Creates a service with single-flight enabled.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>, store: Arc<dyn AssetStorePort>) -> Self {
        Self {
            fetcher,
            store,
            key_locks: Some(KeyLocks::default()),
        }
    }

    /// Enables or disables per-key serialization of concurrent misses.
    #[must_use]
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.key_locks = enabled.then(KeyLocks::default);
        self
    }

    /// Mirrors `url` and returns the reference to render.
    ///
    /// Returns `None` for absent or empty input, the local path when the
    /// image is cached, and the original URL when mirroring fails.
    pub async fn cache_image(&self, url: Option<&str>) -> Option<String> {
        let url = url.filter(|u| !u.is_empty())?;
        Some(self.resolve(url).await.into_reference())
    }

    /// Mirrors `url`, reporting how the reference was obtained.
    pub async fn resolve(&self, url: &str) -> CacheOutcome {
        let key = compute_key(url);
        let extension = extension_of(url);

        let _guard = match &self.key_locks {
            Some(locks) => Some(locks.lock(&key).await),
            None => None,
        };

        if self.store.exists(&key, extension).await {
            debug!(url = %url, key = %key, "Image cache hit");
            return CacheOutcome::Hit(self.asset(key, extension, url));
        }

        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to download image, using remote URL");
                return CacheOutcome::Fallback {
                    source_url: url.to_string(),
                    reason: e,
                };
            }
        };

        let size = bytes.len();
        if let Err(e) = self.store.write(&key, extension, bytes).await {
            warn!(url = %url, error = %e, "Failed to store image, using remote URL");
            return CacheOutcome::Fallback {
                source_url: url.to_string(),
                reason: e,
            };
        }

        debug!(url = %url, key = %key, size, "Mirrored image");
        CacheOutcome::Stored(self.asset(key, extension, url))
    }

    fn asset(&self, cache_key: CacheKey, extension: &'static str, url: &str) -> CachedAsset {
        CachedAsset {
            local_path: self.store.public_path(&cache_key, extension),
            cache_key,
            extension,
            source_url: url.to_string(),
        }
    }
}

/// Per-key async locks, created on demand and dropped when uncontended.
#[derive(Default)]
struct KeyLocks {
    locks: parking_lot::Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    async fn lock(&self, key: &CacheKey) -> KeyGuard<'_> {
        let lock = self.locks.lock().entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        KeyGuard {
            owner: self,
            key: key.clone(),
            _guard: guard,
        }
    }
}

struct KeyGuard<'a> {
    owner: &'a KeyLocks,
    key: CacheKey,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        let mut locks = self.owner.locks.lock();
        // One reference in the map, one in our guard: nobody else is waiting.
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) <= 2)
        {
            locks.remove(&self.key);
        }
    }
}
