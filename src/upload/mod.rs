//! Post-render upload of the finished video.

use std::path::Path;

use crate::foundation::error::ReelResult;

/// Backblaze B2 native API uploader.
pub mod b2;

/// Where an uploaded file ended up.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UploadReceipt {
    pub file_id: String,
    pub file_name: String,
    pub size: u64,
    /// Download URL (the bucket may still require authorization).
    pub url: String,
}

/// Sends a local file to remote storage under `remote_name`.
pub trait Uploader {
    fn upload(&self, path: &Path, remote_name: &str) -> ReelResult<UploadReceipt>;
}
