//! # Upload Staging
//!
//! Multipart file fields are staged to a local file before being handed to
//! the media collaborator. The staged file removes itself when dropped, so
//! the temporary copy is gone after the upload attempt, success or failure,
//! on every return path.

use std::fs;
use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use uuid::Uuid;

use crate::api::{ApiError, ApiResult};

/// A multipart file staged on local disk
///
/// Dropping the value removes the staged file.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    file_name: String,
}

impl StagedFile {
    /// Where the staged bytes live
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The client-supplied file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // Already-removed files are fine; nothing useful to do on failure
        let _ = fs::remove_file(&self.path);
    }
}

/// Read a multipart file field to a staged file in `staging_dir`
pub async fn stage_field(field: Field<'_>, staging_dir: &Path) -> ApiResult<StagedFile> {
    let file_name = field.file_name().unwrap_or("upload.bin").to_string();

    // Stage under a fresh name, keeping the client extension
    let staged_name = match Path::new(&file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    };
    let path = staging_dir.join(staged_name);

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?;

    fs::create_dir_all(staging_dir).map_err(|e| ApiError::Upstream(e.to_string()))?;
    fs::write(&path, &data).map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(StagedFile { path, file_name })
}
