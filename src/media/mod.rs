//! # Media Host
//!
//! The external media-upload collaborator: takes a locally staged file,
//! returns a public URL and an asset identifier, and can delete by
//! identifier later. Configuration is passed explicitly at construction;
//! there is no ambient global state.

pub mod local;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub use local::LocalMediaStore;

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Media collaborator errors
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    /// No asset with this identifier
    #[error("Media asset not found: {0}")]
    NotFound(String),

    /// The upload did not complete
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Filesystem failure while staging or storing
    #[error("I/O error: {0}")]
    Io(String),
}

/// A stored asset on the media host
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Host-side identifier, used for deletion
    pub asset_id: String,

    /// Public URL
    pub url: String,

    /// Size in bytes
    pub bytes: u64,
}

/// Media host interface
pub trait MediaStore: Send + Sync {
    /// Upload the file at `local_path` and return the stored asset.
    ///
    /// The staged file itself is owned by the caller; it must be removed
    /// after the attempt whether or not the upload succeeds (see
    /// `http::upload::StagedFile`).
    fn upload(&self, local_path: &Path) -> MediaResult<MediaAsset>;

    /// Delete an asset by its identifier
    fn delete(&self, asset_id: &str) -> MediaResult<()>;
}

/// Media host configuration, supplied at construction
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory the local store keeps assets in
    pub root: std::path::PathBuf,

    /// Base URL prefixed onto asset ids to form public URLs
    pub public_base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: std::env::temp_dir().join("vidhub_media"),
            public_base_url: "http://localhost:8080/media".to_string(),
        }
    }
}
