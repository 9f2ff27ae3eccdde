//! Disk-backed asset store serving mirrored images from a public directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, trace};

use crate::domain::entities::CacheKey;
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::AssetStorePort;

/// Default cache directory, relative to the site root.
pub const DEFAULT_CACHE_DIR: &str = "public/cached-images";

/// Default URL prefix under which the cache directory is served.
pub const DEFAULT_PUBLIC_PREFIX: &str = "/cached-images";

/// Asset store that persists mirrored images as `<key><ext>` files.
#[derive(Debug, Clone)]
pub struct DiskAssetStore {
    cache_dir: PathBuf,
    public_prefix: String,
}

impl DiskAssetStore {
    /// Creates a store rooted at `cache_dir`, served under `public_prefix`.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the on-disk path for an entry.
    #[must_use]
    pub fn file_path(&self, key: &CacheKey, extension: &str) -> PathBuf {
        self.cache_dir.join(key.file_name(extension))
    }

    /// Writes through a temporary file in the cache directory and renames it
    /// into place, so readers never observe a partially written entry.
    fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        // Temp files are created owner-only; cached images must be servable.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }

        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Default for DiskAssetStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR, DEFAULT_PUBLIC_PREFIX)
    }
}

#[async_trait]
impl AssetStorePort for DiskAssetStore {
    async fn exists(&self, key: &CacheKey, extension: &str) -> bool {
        let path = self.file_path(key, extension);
        let found = fs::try_exists(&path).await.unwrap_or(false);
        trace!(key = %key, path = %path.display(), found, "Checked disk cache");
        found
    }

    async fn write(&self, key: &CacheKey, extension: &str, bytes: Bytes) -> CacheResult<()> {
        fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
            CacheError::filesystem(
                self.cache_dir.display(),
                format!("failed to create cache dir: {e}"),
            )
        })?;

        let dir = self.cache_dir.clone();
        let path = self.file_path(key, extension);
        let size = bytes.len();

        let target = path.clone();
        tokio::task::spawn_blocking(move || Self::write_atomic(&dir, &target, &bytes))
            .await
            .map_err(|e| CacheError::filesystem(path.display(), format!("write task panicked: {e}")))?
            .map_err(|e| {
                CacheError::filesystem(path.display(), format!("failed to write cache file: {e}"))
            })?;

        debug!(key = %key, path = %path.display(), size, "Stored image in disk cache");
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (DiskAssetStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskAssetStore::new(temp_dir.path().join("cached-images"), "/cached-images");
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_file() {
        let (store, _temp) = create_test_store();
        let key = CacheKey::from_url("https://h/a.png");

        assert!(!store.cache_dir().exists());
        store
            .write(&key, ".png", Bytes::from_static(b"png bytes"))
            .await
            .unwrap();

        let path = store.file_path(&key, ".png");
        assert_eq!(std::fs::read(&path).unwrap(), b"png bytes");
        assert!(store.exists(&key, ".png").await);
    }

    #[tokio::test]
    async fn test_exists_is_per_extension() {
        let (store, _temp) = create_test_store();
        let key = CacheKey::new("abc");

        store
            .write(&key, ".png", Bytes::from_static(b"x"))
            .await
            .unwrap();

        assert!(store.exists(&key, ".png").await);
        assert!(!store.exists(&key, ".jpg").await);
    }

    #[tokio::test]
    async fn test_rewrite_same_entry_is_idempotent() {
        let (store, _temp) = create_test_store();
        let key = CacheKey::new("abc");

        store.write(&key, ".gif", Bytes::from_static(b"same")).await.unwrap();
        store.write(&key, ".gif", Bytes::from_static(b"same")).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(store.cache_dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_write_fails_when_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocked");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let store = DiskAssetStore::new(&blocker, "/cached-images");

        let err = store
            .write(&CacheKey::new("k"), ".png", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(err.is_filesystem());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_written_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _temp) = create_test_store();
        let key = CacheKey::new("perm");
        store.write(&key, ".png", Bytes::from_static(b"x")).await.unwrap();

        let mode = std::fs::metadata(store.file_path(&key, ".png"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_public_path() {
        let store = DiskAssetStore::new("/srv/site/public/cached-images", "/cached-images/");
        let key = CacheKey::new("0123abcd");
        assert_eq!(store.public_path(&key, ".webp"), "/cached-images/0123abcd.webp");
    }
}
