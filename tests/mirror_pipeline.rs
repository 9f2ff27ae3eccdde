//! Integration test: mirror images from a mock HTTP server into a temporary
//! cache directory and rewrite HTML against it.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use httpmock::MockServer;
use lexmirror::application::{HtmlImageRewriter, ImageCacheService};
use lexmirror::domain::{CacheError, CacheKey, CacheOutcome};
use lexmirror::infrastructure::{DiskAssetStore, HttpImageFetcher};
use tempfile::tempdir;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-png-body";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg-body";

fn disk_cache(dir: &Path) -> Arc<ImageCacheService> {
    let fetcher = HttpImageFetcher::new(Duration::from_secs(5)).unwrap();
    let store = DiskAssetStore::new(dir, "/cached-images");
    Arc::new(ImageCacheService::new(Arc::new(fetcher), Arc::new(store)))
}

fn cached_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn image_is_downloaded_once_then_served_from_disk() {
    let server = MockServer::start_async().await;
    let image = server
        .mock_async(|when, then| {
            when.method("GET").path("/media/logo.png");
            then.status(200).header("content-type", "image/png").body(PNG);
        })
        .await;
    let url = server.url("/media/logo.png");

    let dir = tempdir().unwrap();
    let cache = disk_cache(dir.path());

    let first = cache.resolve(&url).await;
    assert!(matches!(first, CacheOutcome::Stored(_)));

    let key = CacheKey::from_url(&url);
    assert_eq!(first.reference(), format!("/cached-images/{key}.png"));
    assert_eq!(std::fs::read(dir.path().join(format!("{key}.png"))).unwrap(), PNG);

    let second = cache.resolve(&url).await;
    assert!(second.is_hit());
    assert_eq!(second.reference(), first.reference());
    image.assert_hits_async(1).await;
}

#[tokio::test]
async fn existing_entry_from_earlier_build_is_reused() {
    let server = MockServer::start_async().await;
    let image = server
        .mock_async(|when, then| {
            when.method("GET").path("/media/team.jpg");
            then.status(200).header("content-type", "image/jpeg").body(JPEG);
        })
        .await;
    let url = server.url("/media/team.jpg");
    let dir = tempdir().unwrap();

    let earlier_build = disk_cache(dir.path());
    earlier_build.resolve(&url).await;

    let this_build = disk_cache(dir.path());
    let outcome = this_build.resolve(&url).await;

    assert!(outcome.is_hit());
    image.assert_hits_async(1).await;
}

#[tokio::test]
async fn missing_image_falls_back_and_writes_nothing() {
    let server = MockServer::start_async().await;
    let gone = server
        .mock_async(|when, then| {
            when.method("GET").path("/media/gone.jpg");
            then.status(404);
        })
        .await;
    let url = server.url("/media/gone.jpg");

    let dir = tempdir().unwrap();
    let cache = disk_cache(dir.path());

    let outcome = cache.resolve(&url).await;

    match outcome {
        CacheOutcome::Fallback { source_url, reason } => {
            assert_eq!(source_url, url);
            assert!(matches!(reason, CacheError::Status { status: 404, .. }));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
    assert!(cached_files(dir.path()).is_empty());
    assert_eq!(cache.cache_image(Some(&url)).await.as_deref(), Some(url.as_str()));
    gone.assert_hits_async(2).await;
}

#[tokio::test]
async fn unreachable_host_falls_back_with_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}/photo.jpg");

    let dir = tempdir().unwrap();
    let cache = disk_cache(dir.path());

    let outcome = cache.resolve(&url).await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.reference(), url);
    assert!(cached_files(dir.path()).is_empty());
}

#[tokio::test]
async fn concurrent_requests_for_one_url_download_once() {
    let server = MockServer::start_async().await;
    let image = server
        .mock_async(|when, then| {
            when.method("GET").path("/media/hero.webp");
            then.status(200)
                .header("content-type", "image/webp")
                .body("webp")
                .delay(Duration::from_millis(50));
        })
        .await;
    let url = server.url("/media/hero.webp");

    let dir = tempdir().unwrap();
    let cache = disk_cache(dir.path());

    let outcomes = join_all((0..6).map(|_| cache.resolve(&url))).await;

    let key = CacheKey::from_url(&url);
    let expected = format!("/cached-images/{key}.webp");
    assert!(outcomes.iter().all(|o| o.reference() == expected));
    assert_eq!(outcomes.iter().filter(|o| o.is_hit()).count(), 5);
    image.assert_hits_async(1).await;
    assert_eq!(cached_files(dir.path()), vec![format!("{key}.webp")]);
}

#[tokio::test]
async fn html_rewrite_mirrors_reachable_images_only() {
    let server = MockServer::start_async().await;
    let good_image = server
        .mock_async(|when, then| {
            when.method("GET").path("/media/a.png");
            then.status(200).header("content-type", "image/png").body(PNG);
        })
        .await;
    let bad_image = server
        .mock_async(|when, then| {
            when.method("GET").path("/media/missing.gif");
            then.status(404);
        })
        .await;
    let good = server.url("/media/a.png");
    let bad = server.url("/media/missing.gif");

    let html = format!(
        r#"<p>Intro</p><img src="{good}" alt="a"><img src='{bad}'><img src="{good}"><img src="/static/local.png">"#
    );

    let dir = tempdir().unwrap();
    let rewriter = HtmlImageRewriter::new(disk_cache(dir.path()));

    let rewritten = rewriter.rewrite(&html).await;

    let local = format!("/cached-images/{}.png", CacheKey::from_url(&good));
    assert_eq!(
        rewritten,
        format!(
            r#"<p>Intro</p><img src="{local}" alt="a"><img src='{bad}'><img src="{local}"><img src="/static/local.png">"#
        )
    );
    good_image.assert_hits_async(1).await;
    bad_image.assert_hits_async(1).await;
}
