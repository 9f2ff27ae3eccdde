//! Image caching error types.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Failures that make the cache pipeline fall back to the remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum CacheError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("filesystem error at {path}: {message}")]
    Filesystem { path: String, message: String },
}

impl CacheError {
    /// Creates a transport-level network error.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a non-success status error.
    #[must_use]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a filesystem error.
    #[must_use]
    pub fn filesystem(path: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::Filesystem {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Returns whether the failure happened while talking to the remote host.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }

    /// Returns whether the failure happened in the local store.
    #[must_use]
    pub const fn is_filesystem(&self) -> bool {
        matches!(self, Self::Filesystem { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(CacheError::network("https://h/a.jpg", "timed out").is_network());
        assert!(CacheError::status("https://h/a.jpg", 404).is_network());
        assert!(CacheError::filesystem("/tmp/x", "denied").is_filesystem());
        assert!(!CacheError::filesystem("/tmp/x", "denied").is_network());
    }

    #[test]
    fn test_status_message() {
        let err = CacheError::status("https://h/a.jpg", 404);
        assert_eq!(err.to_string(), "HTTP 404 fetching https://h/a.jpg");
    }
}
