//! # Local Media Store
//!
//! Filesystem-backed media host used for tests and development. Assets are
//! copied under a configured root and served under a configured base URL.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{MediaAsset, MediaConfig, MediaError, MediaResult, MediaStore};

/// Local filesystem media store
#[derive(Debug)]
pub struct LocalMediaStore {
    config: MediaConfig,
}

impl LocalMediaStore {
    /// Create a store from explicit configuration
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    fn asset_path(&self, asset_id: &str) -> PathBuf {
        self.config.root.join(asset_id)
    }
}

impl MediaStore for LocalMediaStore {
    fn upload(&self, local_path: &Path) -> MediaResult<MediaAsset> {
        let metadata = fs::metadata(local_path)
            .map_err(|e| MediaError::UploadFailed(format!("{}: {e}", local_path.display())))?;

        if !metadata.is_file() {
            return Err(MediaError::UploadFailed(format!(
                "{} is not a file",
                local_path.display()
            )));
        }

        // Asset id keeps the original extension so the URL stays typed
        let asset_id = match local_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        fs::create_dir_all(&self.config.root).map_err(|e| MediaError::Io(e.to_string()))?;
        fs::copy(local_path, self.asset_path(&asset_id))
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        Ok(MediaAsset {
            url: format!("{}/{asset_id}", self.config.public_base_url),
            asset_id,
            bytes: metadata.len(),
        })
    }

    fn delete(&self, asset_id: &str) -> MediaResult<()> {
        fs::remove_file(self.asset_path(asset_id)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaError::NotFound(asset_id.to_string())
            } else {
                MediaError::Io(e.to_string())
            }
        })
    }
}
