use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lexmirror::application::{ContentCatalog, EntityImageResolver, ImageCacheService};
use lexmirror::infrastructure::{
    AppConfig, CliArgs, Command, ContentApiClient, DiskAssetStore, HttpImageFetcher, load_config,
    write_site_content,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn create_cache(config: &AppConfig) -> Result<Arc<ImageCacheService>> {
    let fetcher = Arc::new(HttpImageFetcher::new(config.fetch_timeout())?);
    let store = Arc::new(DiskAssetStore::new(
        config.cache_dir.clone(),
        config.public_prefix.clone(),
    ));

    Ok(Arc::new(
        ImageCacheService::new(fetcher, store).with_single_flight(config.single_flight),
    ))
}

fn create_catalog(config: &AppConfig, cache: Arc<ImageCacheService>) -> Result<ContentCatalog> {
    let api = Arc::new(ContentApiClient::with_base_url(
        config.api_url.clone(),
        config.fetch_timeout(),
    )?);
    let resolver = Arc::new(EntityImageResolver::new(cache, config.api_origin.clone()));

    Ok(ContentCatalog::new(api, resolver).with_max_concurrent(config.max_concurrent_resolutions))
}

async fn sync(config: &AppConfig, cache: Arc<ImageCacheService>, out: &Path) -> Result<()> {
    let catalog = create_catalog(config, cache)?;

    info!(api_url = %config.api_url, cache_dir = %config.cache_dir.display(), "Syncing content");
    let content = catalog.snapshot().await;

    write_site_content(out, &content).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(
        version = lexmirror::VERSION,
        config_file = ?config.config,
        "Starting lexmirror"
    );

    let cache = create_cache(&config)?;

    match args.command {
        Command::Sync { out } => sync(&config, cache, &out).await,
        Command::Cache { url } => {
            let outcome = cache.resolve(&url).await;
            println!("{}", outcome.reference());
            Ok(())
        }
    }
}
