//! Publishing generated files to object storage

#[cfg(test)]
pub mod fake;
pub mod gcs;
pub mod publish;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

pub use gcs::GcsUploader;
pub use publish::{Artifact, UploadOutcome, UploadReport, publish_all, skipped};

/// Why a single upload did not happen
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no bucket name configured")]
    MissingBucket,

    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid upload URL {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Capability to put a local file into a bucket
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload `source_file_path` as `destination_blob_name` and return its public URL
    async fn upload(
        &self,
        bucket_name: &str,
        source_file_path: &Path,
        destination_blob_name: &str,
    ) -> Result<String, UploadError>;
}
