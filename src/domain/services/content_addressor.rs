//! Maps source URLs to content addresses in the local store.

use url::Url;

use crate::domain::entities::CacheKey;

/// Extensions that may reach the filesystem, lowercase with leading dot.
pub const ALLOWED_EXTENSIONS: [&str; 8] = [
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".avif", ".svg", ".ico",
];

/// Extension used when the URL has none, an unknown one, or does not parse.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Computes the cache key for a URL.
#[must_use]
pub fn compute_key(url: &str) -> CacheKey {
    CacheKey::from_url(url)
}

/// Returns the allow-listed extension of the URL's path.
///
/// Only the last path segment is inspected, so query strings and fragments
/// never contribute. The result is always one of [`ALLOWED_EXTENSIONS`].
#[must_use]
pub fn extension_of(url: &str) -> &'static str {
    let Ok(parsed) = Url::parse(url) else {
        return DEFAULT_EXTENSION;
    };

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    // A leading dot marks a hidden file, not an extension.
    let Some(dot) = segment.rfind('.').filter(|&i| i > 0) else {
        return DEFAULT_EXTENSION;
    };

    let candidate = segment[dot..].to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .find(|allowed| **allowed == candidate)
        .copied()
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://h/a/b/photo.png", ".png" ; "png")]
    #[test_case("https://h/x", ".jpg" ; "no_extension")]
    #[test_case("https://h/a/PHOTO.JPEG", ".jpeg" ; "uppercase")]
    #[test_case("https://h/a/b.webp?w=400&fmt=.png", ".webp" ; "query_ignored")]
    #[test_case("https://h/a/icon.svg#frag", ".svg" ; "fragment_ignored")]
    #[test_case("https://h/a/logo.avif", ".avif" ; "avif")]
    #[test_case("https://h/favicon.ico", ".ico" ; "ico")]
    #[test_case("https://h/a/page.php", ".jpg" ; "not_allowed")]
    #[test_case("https://h/a/evil.png%2F..%2Fx", ".jpg" ; "encoded_traversal")]
    #[test_case("https://h/a/.png", ".jpg" ; "hidden_file")]
    #[test_case("https://h/a/trailing.", ".jpg" ; "trailing_dot")]
    #[test_case("https://h/dir.png/", ".jpg" ; "trailing_slash")]
    #[test_case("not a url", ".jpg" ; "malformed")]
    #[test_case("/media/photo.png", ".jpg" ; "relative_does_not_parse")]
    fn test_extension_of(url: &str, expected: &str) {
        assert_eq!(extension_of(url), expected);
    }

    #[test]
    fn test_compute_key_is_deterministic() {
        let url = "https://h/a/b/photo.png";
        assert_eq!(compute_key(url), compute_key(url));
        assert_ne!(compute_key(url), compute_key("https://h/a/b/photo2.png"));
    }
}
