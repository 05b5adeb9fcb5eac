//! State code generation: workbook in, JSON file and uploads out
//!
//! The run is linear and non-transactional. Open, resolve the sheet, find the
//! header columns, scan rows, write JSON, then upload the generated file and
//! its `india.json` sibling. Step failures end the run with a
//! [`GenerateError`]; a failed upload only marks its own artifact.

use std::path::{Path, PathBuf};

use crate::config::{Config, INDIA_BLOB, STATE_CODES_BLOB, STATE_DISTRICT_DETAILS};
use crate::error::GenerateError;
use crate::extract::read_state_codes;
use crate::output::write_state_codes;
use crate::upload::{Artifact, UploadReport, Uploader, publish_all, skipped};

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub rows_processed: usize,
    pub rows_skipped: usize,
    pub unique_states: usize,
    /// One entry per artifact: generated file first, then `india.json`
    pub uploads: Vec<UploadReport>,
}

impl GenerateReport {
    /// True when every artifact reached the bucket
    pub fn fully_published(&self) -> bool {
        self.uploads.iter().all(|u| u.outcome.is_uploaded())
    }
}

/// Generate `state_code_details.json` from `workbook` and publish it.
///
/// With no uploader the local file is still written and both artifacts are
/// reported as skipped.
pub async fn generate(
    workbook: &Path,
    config: &Config,
    uploader: Option<&dyn Uploader>,
) -> Result<GenerateReport, GenerateError> {
    let sheet_title = config
        .sheet_title(STATE_DISTRICT_DETAILS)
        .ok_or_else(|| GenerateError::UnknownSheetKey(STATE_DISTRICT_DETAILS.to_string()))?;

    let scan = read_state_codes(
        workbook,
        sheet_title,
        config.expected_headers(STATE_DISTRICT_DETAILS),
    )?;

    if scan.states.is_empty() {
        log::warn!("No state rows found in sheet '{}'", sheet_title);
    }

    let output_path = config.output_path();
    write_state_codes(&output_path, &scan.states).map_err(|e| GenerateError::OutputWrite {
        path: output_path.clone(),
        reason: format!("{:#}", e),
    })?;
    log::info!("Successfully created {}", output_path.display());

    let artifacts = [
        Artifact::new(output_path.clone(), STATE_CODES_BLOB),
        Artifact::new(config.india_path(), INDIA_BLOB),
    ];

    let uploads = match uploader {
        Some(uploader) => publish_all(uploader, config.bucket_name.as_deref(), &artifacts).await,
        None => {
            log::info!("Upload disabled, skipping {} artifacts", artifacts.len());
            skipped(&artifacts)
        }
    };

    Ok(GenerateReport {
        output_path,
        rows_processed: scan.rows_processed,
        rows_skipped: scan.rows_skipped,
        unique_states: scan.states.len(),
        uploads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadOutcome;
    use crate::upload::fake::FakeUploader;
    use rust_xlsxwriter::Workbook;
    use std::fs;
    use tempfile::TempDir;

    enum Cell {
        Text(&'static str),
        Num(f64),
        Blank,
    }

    use Cell::{Blank, Num, Text};

    /// Write a one-sheet workbook; the first row is the header
    fn write_workbook(dir: &Path, sheet_name: &str, rows: &[Vec<Cell>]) -> PathBuf {
        let path = dir.join("lgd.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Text(s) => {
                        sheet.write_string(r as u32, c as u16, *s).unwrap();
                    }
                    Num(n) => {
                        sheet.write_number(r as u32, c as u16, *n).unwrap();
                    }
                    Blank => {}
                }
            }
        }

        workbook.save(&path).unwrap();
        path
    }

    fn test_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.pages_dir = dir.join("pages");
        config.bucket_name = Some("dash-assets".to_string());
        config
    }

    fn read_output(config: &Config) -> serde_json::Value {
        let content = fs::read_to_string(config.output_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn test_generate_writes_and_uploads() {
        let dir = TempDir::new().unwrap();
        let workbook = write_workbook(
            dir.path(),
            "State District Details",
            &[
                vec![Text("State Name"), Text("State Code"), Text("District Name")],
                vec![Text("Kerala"), Num(32.0), Text("Kollam")],
                vec![Text("Kerala"), Num(32.0), Text("Idukki")],
                vec![Text("Goa"), Num(30.0), Text("North Goa")],
            ],
        );
        let config = test_config(dir.path());
        let uploader = FakeUploader::default();

        let report = generate(&workbook, &config, Some(&uploader)).await.unwrap();

        assert_eq!(report.rows_processed, 3);
        assert_eq!(report.unique_states, 2);
        assert!(report.fully_published());
        assert_eq!(read_output(&config), serde_json::json!({"Kerala": 32, "Goa": 30}));

        let attempts = uploader.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].0, "dash-assets");
        assert_eq!(attempts[0].1, config.output_path());
        assert_eq!(attempts[0].2, "sg-dashboard/state_code_details.json");
        assert_eq!(attempts[1].1, config.india_path());
        assert_eq!(attempts[1].2, "sg-dashboard/india.json");
    }

    #[tokio::test]
    async fn test_sentinel_row_ends_scan() {
        let dir = TempDir::new().unwrap();
        let workbook = write_workbook(
            dir.path(),
            "State District Details",
            &[
                vec![Text(" STATE NAME "), Text("state code")],
                vec![Text("Alpha"), Num(1.0)],
                vec![Text("Beta"), Num(2.0)],
                vec![Blank, Blank],
                vec![Text("Gamma"), Num(3.0)],
            ],
        );
        let config = test_config(dir.path());

        let report = generate(&workbook, &config, None).await.unwrap();

        assert_eq!(report.rows_processed, 2);
        assert_eq!(read_output(&config), serde_json::json!({"Alpha": 1, "Beta": 2}));
        assert!(report.uploads.iter().all(|u| u.outcome == UploadOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_missing_code_column_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let workbook = write_workbook(
            dir.path(),
            "State District Details",
            &[
                vec![Text("State Name"), Text("District Name")],
                vec![Text("Kerala"), Text("Kollam")],
            ],
        );
        let config = test_config(dir.path());
        let uploader = FakeUploader::default();

        let err = generate(&workbook, &config, Some(&uploader)).await.unwrap_err();

        match err {
            GenerateError::MissingRequiredColumns { missing } => {
                assert_eq!(missing, vec!["state code".to_string()])
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!config.output_path().exists());
        assert!(uploader.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_sheet_not_found_lists_available() {
        let dir = TempDir::new().unwrap();
        let workbook = write_workbook(
            dir.path(),
            "Districts",
            &[vec![Text("State Name"), Text("State Code")]],
        );
        let config = test_config(dir.path());

        let err = generate(&workbook, &config, None).await.unwrap_err();

        match err {
            GenerateError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "State District Details");
                assert_eq!(available, vec!["Districts".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreadable_source() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("not-a-workbook.xlsx");
        fs::write(&bogus, "plain text").unwrap();
        let config = test_config(dir.path());

        let err = generate(&bogus, &config, None).await.unwrap_err();
        assert!(matches!(err, GenerateError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unknown_sheet_key() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(dir.path());
        config.sheets.clear();

        let err = generate(&dir.path().join("lgd.xlsx"), &config, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnknownSheetKey(_)));
    }

    #[tokio::test]
    async fn test_failed_primary_upload_still_uploads_sibling() {
        let dir = TempDir::new().unwrap();
        let workbook = write_workbook(
            dir.path(),
            "State District Details",
            &[
                vec![Text("State Name"), Text("State Code")],
                vec![Text("Odisha"), Num(21.0)],
            ],
        );
        let config = test_config(dir.path());
        let uploader = FakeUploader::failing_for(STATE_CODES_BLOB);

        let report = generate(&workbook, &config, Some(&uploader)).await.unwrap();

        assert!(!report.fully_published());
        assert!(matches!(report.uploads[0].outcome, UploadOutcome::Failed { .. }));
        assert!(report.uploads[1].outcome.is_uploaded());
        // The local file stays in place
        assert!(config.output_path().exists());
    }
}
