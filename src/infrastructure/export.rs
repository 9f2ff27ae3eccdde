//! Writes resolved site content as JSON files for the page generator.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::application::use_cases::SiteContent;

/// File holding the attorney records.
pub const ATTORNEYS_FILE: &str = "attorneys.json";
/// File holding the blog records.
pub const BLOGS_FILE: &str = "blogs.json";
/// File holding the practice area records.
pub const PRACTICE_AREAS_FILE: &str = "practice-areas.json";

/// Content export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory or a file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A collection could not be encoded.
    #[error("failed to encode {file}: {source}")]
    Encode {
        /// Output file name.
        file: &'static str,
        /// Underlying encoder error.
        source: serde_json::Error,
    },
}

/// Writes one pretty-printed JSON array per collection into `dir`.
///
/// The directory is created if needed and existing files are replaced.
/// Returns the written paths, attorneys first, then blogs, then practice
/// areas.
///
/// # Errors
///
/// Returns `ExportError` if a collection cannot be encoded or written.
pub async fn write_site_content(
    dir: &Path,
    content: &SiteContent,
) -> Result<Vec<PathBuf>, ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.display().to_string(),
            source,
        })?;

    Ok(vec![
        write_collection(dir, ATTORNEYS_FILE, &content.attorneys).await?,
        write_collection(dir, BLOGS_FILE, &content.blogs).await?,
        write_collection(dir, PRACTICE_AREAS_FILE, &content.practice_areas).await?,
    ])
}

async fn write_collection<T: Serialize>(
    dir: &Path,
    file: &'static str,
    records: &[T],
) -> Result<PathBuf, ExportError> {
    let body =
        serde_json::to_vec_pretty(records).map_err(|source| ExportError::Encode { file, source })?;

    let path = dir.join(file);
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

    info!(path = %path.display(), records = records.len(), "Wrote content file");
    Ok(path)
}
