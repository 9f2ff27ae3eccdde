//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::application::services::DEFAULT_API_ORIGIN;
use crate::application::use_cases::DEFAULT_MAX_CONCURRENT_RESOLUTIONS;
use crate::infrastructure::http::{DEFAULT_API_URL, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::infrastructure::store::{DEFAULT_CACHE_DIR, DEFAULT_PUBLIC_PREFIX};

const APP_NAME: &str = "lexmirror";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "lexmirror";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    pub log_level: LogLevel,

    /// Content API base URL, e.g. `https://example.com/api`.
    pub api_url: String,

    /// Origin prefixed to host-relative media paths.
    pub api_origin: String,

    /// Directory mirrored images are written to.
    pub cache_dir: PathBuf,

    /// URL prefix the cache directory is served under.
    pub public_prefix: String,

    /// Per-request timeout for image and API requests, in seconds.
    pub fetch_timeout_secs: u64,

    /// Records resolved concurrently per collection.
    pub max_concurrent_resolutions: usize,

    /// Collapse concurrent downloads of the same uncached URL into one.
    pub single_flight: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_url: DEFAULT_API_URL.to_string(),
            api_origin: DEFAULT_API_ORIGIN.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            public_prefix: DEFAULT_PUBLIC_PREFIX.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_concurrent_resolutions: DEFAULT_MAX_CONCURRENT_RESOLUTIONS,
            single_flight: true,
        }
    }
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api_url.clone_from(api_url);
        }
        if let Some(api_origin) = &args.api_origin {
            self.api_origin.clone_from(api_origin);
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache_dir.clone_from(cache_dir);
        }
        if let Some(public_prefix) = &args.public_prefix {
            self.public_prefix.clone_from(public_prefix);
        }
        if let Some(timeout) = args.fetch_timeout_secs {
            self.fetch_timeout_secs = timeout;
        }
        if let Some(max_concurrent) = args.max_concurrent_resolutions {
            self.max_concurrent_resolutions = max_concurrent;
        }
        if let Some(single_flight) = args.single_flight {
            self.single_flight = single_flight;
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"
            api_url = "https://cms.example.com/api"
            api_origin = "https://cms.example.com"
            cache_dir = "site/public/cached-images"
            single_flight = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api_url, "https://cms.example.com/api");
        assert_eq!(config.cache_dir, PathBuf::from("site/public/cached-images"));
        assert!(!config.single_flight);
        assert_eq!(config.public_prefix, DEFAULT_PUBLIC_PREFIX);
        assert_eq!(config.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "lexmirror",
            "--api-url",
            "https://cms.example.com/api",
            "--cache-dir",
            "/tmp/cache",
            "--log-level",
            "warn",
            "cache",
            "https://h/a.png",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.api_url, "https://cms.example.com/api");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cache"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.api_origin, DEFAULT_API_ORIGIN);
    }
}
