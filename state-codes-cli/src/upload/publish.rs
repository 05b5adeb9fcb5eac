//! Upload a set of artifacts, each independently of the others

use std::fmt;
use std::path::PathBuf;

use super::Uploader;

/// A local file and where it goes in the bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub source: PathBuf,
    pub destination: String,
}

impl Artifact {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// What happened to one artifact
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Uploaded { url: String },
    Failed { reason: String },
    Skipped,
}

impl UploadOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Uploaded { url } => write!(f, "uploaded to {}", url),
            UploadOutcome::Failed { reason } => write!(f, "failed: {}", reason),
            UploadOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub artifact: Artifact,
    pub outcome: UploadOutcome,
}

/// Upload every artifact in order.
///
/// A failure is recorded and logged, then the next artifact is attempted.
/// Without a bucket name each artifact fails on its own.
pub async fn publish_all(
    uploader: &dyn Uploader,
    bucket_name: Option<&str>,
    artifacts: &[Artifact],
) -> Vec<UploadReport> {
    let mut reports = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let outcome = match bucket_name {
            Some(bucket) => {
                match uploader
                    .upload(bucket, &artifact.source, &artifact.destination)
                    .await
                {
                    Ok(url) => UploadOutcome::Uploaded { url },
                    Err(e) => UploadOutcome::Failed {
                        reason: e.to_string(),
                    },
                }
            }
            None => UploadOutcome::Failed {
                reason: format!("{} is not set", crate::config::BUCKET_NAME_ENV),
            },
        };

        match &outcome {
            UploadOutcome::Uploaded { url } => {
                log::info!("Uploaded {} -> {}", artifact.source.display(), url)
            }
            _ => log::error!(
                "Failed to upload {} to {}: {}",
                artifact.source.display(),
                artifact.destination,
                outcome
            ),
        }

        reports.push(UploadReport {
            artifact: artifact.clone(),
            outcome,
        });
    }

    reports
}

/// Reports for artifacts that were deliberately not uploaded
pub fn skipped(artifacts: &[Artifact]) -> Vec<UploadReport> {
    artifacts
        .iter()
        .map(|artifact| UploadReport {
            artifact: artifact.clone(),
            outcome: UploadOutcome::Skipped,
        })
        .collect()
}
