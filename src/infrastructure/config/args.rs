use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "lexmirror",
    version,
    about = "Mirrors images referenced by the site's content API into a local cache",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Content API base URL.
    #[arg(long, env = "LEXMIRROR_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Origin prefixed to host-relative media paths.
    #[arg(long, env = "LEXMIRROR_API_ORIGIN", global = true)]
    pub api_origin: Option<String>,

    /// Directory mirrored images are written to.
    #[arg(long, value_name = "DIR", env = "LEXMIRROR_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// URL prefix the cache directory is served under.
    #[arg(long, global = true)]
    pub public_prefix: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub fetch_timeout_secs: Option<u64>,

    /// Records resolved concurrently per collection.
    #[arg(long, global = true)]
    pub max_concurrent_resolutions: Option<usize>,

    /// Collapse concurrent downloads of the same URL.
    #[arg(long, global = true)]
    pub single_flight: Option<bool>,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every collection, mirror its images and write the records as JSON.
    Sync {
        /// Directory the JSON files are written to.
        #[arg(long, value_name = "DIR", default_value = "content")]
        out: PathBuf,
    },
    /// Mirror a single image URL and print the reference to use.
    Cache {
        /// Absolute image URL.
        url: String,
    },
}
