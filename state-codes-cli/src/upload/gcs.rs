//! Google Cloud Storage uploader over the JSON API

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::{UploadError, Uploader};
use crate::config::StorageConfig;

/// Uploads files with single-request media uploads
pub struct GcsUploader {
    endpoint: String,
    public_base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl GcsUploader {
    pub fn new(config: &StorageConfig) -> Self {
        let user_agent = format!("state-codes/{}", env!("CARGO_PKG_VERSION"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            client,
        }
    }

    /// `POST {endpoint}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}`
    fn upload_url(&self, bucket_name: &str, destination_blob_name: &str) -> Result<Url, UploadError> {
        let base = format!("{}/upload/storage/v1/b/{}/o", self.endpoint, bucket_name);
        let mut url = Url::parse(&base).map_err(|e| UploadError::InvalidUrl(format!("{}: {}", base, e)))?;

        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", destination_blob_name);

        Ok(url)
    }

    /// Public link to an uploaded object
    pub fn public_url(&self, bucket_name: &str, destination_blob_name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket_name, destination_blob_name)
    }
}

#[async_trait]
impl Uploader for GcsUploader {
    async fn upload(
        &self,
        bucket_name: &str,
        source_file_path: &Path,
        destination_blob_name: &str,
    ) -> Result<String, UploadError> {
        if bucket_name.trim().is_empty() {
            return Err(UploadError::MissingBucket);
        }

        let body = fs::read(source_file_path).map_err(|source| UploadError::ReadSource {
            path: source_file_path.to_path_buf(),
            source,
        })?;

        let url = self.upload_url(bucket_name, destination_blob_name)?;
        log::debug!("Uploading {} ({} bytes) to {}", source_file_path.display(), body.len(), url);

        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type(source_file_path))
            .body(body);

        if let Some(ref token) = self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { status, body });
        }

        Ok(self.public_url(bucket_name, destination_blob_name))
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
