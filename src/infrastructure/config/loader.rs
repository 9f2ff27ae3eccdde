use super::app_config::AppConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
    /// The file exists but could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML or has fields of the wrong type.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: String,
        /// Parser diagnostic.
        source: toml::de::Error,
    },
}

/// Loads the configuration file.
///
/// A missing default file yields the defaults; a missing explicitly requested
/// file is an error, and so is a file that does not parse.
///
/// # Errors
///
/// Returns `ConfigError` if an explicit file is missing, or if the file
/// cannot be read or parsed.
pub fn load_config(path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(config_path) = path_override
        .map(Path::to_path_buf)
        .or_else(AppConfig::default_config_path)
    else {
        return Ok(AppConfig::default());
    };

    if !config_path.exists() {
        if path_override.is_some() {
            return Err(ConfigError::NotFound(config_path.display().to_string()));
        }
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&config_path)?;
    let mut config: AppConfig =
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path.display().to_string(),
            source,
        })?;
    config.config = Some(config_path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "public_prefix = \"/img\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.public_prefix, "/img");
        assert_eq!(config.config, Some(path));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_wrong_field_type_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "fetch_timeout_secs = \"soon\"\n").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
