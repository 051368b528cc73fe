//! Where uploaded images live. The media endpoints only ever see the path or
//! URL returned by an [`ImageStore`]; raw bytes never reach the database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::Config;

mod cloudinary;
mod local;

pub use cloudinary::CloudinaryImageStore;
pub use local::LocalImageStore;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host rejected the request: {0}")]
    Provider(String),

    #[error("Not a path managed by this store: {0}")]
    InvalidPath(String),
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under `file_name` and return the path or URL clients
    /// use to fetch it.
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ImageStoreError>;

    /// Remove a previously stored image.
    async fn delete(&self, image_path: &str) -> Result<(), ImageStoreError>;
}

/// Cloudinary when it is configured, the local upload directory otherwise.
pub fn from_config(config: &Config) -> Arc<dyn ImageStore> {
    match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!(cloud_name = %cloudinary.cloud_name, "Storing images on Cloudinary");
            Arc::new(CloudinaryImageStore::new(cloudinary.clone()))
        }
        None => {
            tracing::info!(upload_dir = %config.upload_dir.display(), "Storing images on local disk");
            Arc::new(LocalImageStore::new(config.upload_dir.clone()))
        }
    }
}

/// Reduce a client-supplied filename to a safe basename: whitespace becomes
/// `_`, anything outside `[A-Za-z0-9._-]` is dropped, and leading or trailing
/// dots and underscores are trimmed.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let cleaned = cleaned.trim_matches(['.', '_']);
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Name under which an upload is stored: `YYYYmmdd_HHMMSS_<sanitized name>`.
pub fn stored_file_name(original: &str, uploaded_at: DateTime<Utc>) -> Option<String> {
    let sanitized = sanitize_file_name(original)?;
    Some(format!("{}_{}", uploaded_at.format("%Y%m%d_%H%M%S"), sanitized))
}

/// A stored file name is a single path component.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.starts_with('.')
}
