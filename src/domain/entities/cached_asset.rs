//! Domain types for mirrored image assets.

use sha2::{Digest, Sha256};

use crate::domain::errors::CacheError;

/// Content address of a mirrored image.
///
/// Derived from the source URL alone, never from the downloaded bytes, so the
/// same URL maps to the same key in every process and every build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Creates a `CacheKey` from an already computed digest.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Creates a `CacheKey` from a URL by hashing it.
    ///
    /// SHA-256 over the UTF-8 bytes of the URL, truncated to 128 bits and
    /// rendered as 32 lowercase hex characters.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file name for this key with the given extension.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}{extension}", self.0)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image that has been mirrored into the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAsset {
    /// Content address derived from `source_url`.
    pub cache_key: CacheKey,
    /// Allow-listed extension, including the leading dot.
    pub extension: &'static str,
    /// Public path the renderer should reference.
    pub local_path: String,
    /// Remote URL the asset was mirrored from.
    pub source_url: String,
}

/// Outcome of mirroring a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The asset was already in the store; nothing was downloaded.
    Hit(CachedAsset),
    /// The asset was downloaded and written during this call.
    Stored(CachedAsset),
    /// Mirroring failed and the remote URL is used as-is.
    Fallback {
        /// The URL that could not be mirrored.
        source_url: String,
        /// Why mirroring failed.
        reason: CacheError,
    },
}

impl CacheOutcome {
    /// Returns the reference to render: the local path when cached, the
    /// original URL otherwise.
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::Hit(asset) | Self::Stored(asset) => &asset.local_path,
            Self::Fallback { source_url, .. } => source_url,
        }
    }

    /// Consumes the outcome, returning the reference to render.
    #[must_use]
    pub fn into_reference(self) -> String {
        match self {
            Self::Hit(asset) | Self::Stored(asset) => asset.local_path,
            Self::Fallback { source_url, .. } => source_url,
        }
    }

    /// Returns the cached asset, if any.
    #[must_use]
    pub const fn asset(&self) -> Option<&CachedAsset> {
        match self {
            Self::Hit(asset) | Self::Stored(asset) => Some(asset),
            Self::Fallback { .. } => None,
        }
    }

    /// Returns true if the asset was served from the store.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Returns true if mirroring failed.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
