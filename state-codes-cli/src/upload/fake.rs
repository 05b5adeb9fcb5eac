//! In-memory uploader for tests

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{UploadError, Uploader};

/// Records every call and rejects the destinations it was told to
#[derive(Debug, Default)]
pub struct FakeUploader {
    failing: Vec<String>,
    attempts: Mutex<Vec<(String, PathBuf, String)>>,
}

impl FakeUploader {
    pub fn failing_for(destination: &str) -> Self {
        Self {
            failing: vec![destination.to_string()],
            ..Default::default()
        }
    }

    /// `(bucket, source, destination)` per call, in call order
    pub fn attempts(&self) -> Vec<(String, PathBuf, String)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Uploader for FakeUploader {
    async fn upload(
        &self,
        bucket_name: &str,
        source_file_path: &Path,
        destination_blob_name: &str,
    ) -> Result<String, UploadError> {
        self.attempts.lock().unwrap().push((
            bucket_name.to_string(),
            source_file_path.to_path_buf(),
            destination_blob_name.to_string(),
        ));

        if self.failing.iter().any(|d| d == destination_blob_name) {
            return Err(UploadError::Rejected {
                status: 500,
                body: "simulated failure".to_string(),
            });
        }

        Ok(format!(
            "https://example.test/{}/{}",
            bucket_name, destination_blob_name
        ))
    }
}
