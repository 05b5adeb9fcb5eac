//! Generate command handler

use anyhow::{Context, Result};
use colored::*;

use super::Cli;
use crate::config::Config;
use crate::generator::{GenerateReport, generate};
use crate::upload::{GcsUploader, UploadOutcome, Uploader};

/// Run a generation from parsed arguments and print a summary
pub async fn handle_generate(args: Cli) -> Result<GenerateReport> {
    if !args.workbook.exists() {
        anyhow::bail!("Excel file not found at {}", args.workbook.display());
    }

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = args.pages_dir {
        config.pages_dir = dir;
    }
    if let Some(bucket) = args.bucket {
        config.bucket_name = Some(bucket);
    }

    let gcs = (!args.skip_upload).then(|| GcsUploader::new(&config.storage));
    let uploader = gcs.as_ref().map(|u| u as &dyn Uploader);

    let report = generate(&args.workbook, &config, uploader).await?;

    print_summary(&report);
    Ok(report)
}

fn print_summary(report: &GenerateReport) {
    println!(
        "{} {} ({} unique states from {} rows)",
        "Wrote".bright_green().bold(),
        report.output_path.display(),
        report.unique_states,
        report.rows_processed
    );

    if report.rows_skipped > 0 {
        println!(
            "{} {} rows with a blank name or invalid state code",
            "Skipped".yellow().bold(),
            report.rows_skipped
        );
    }

    for upload in &report.uploads {
        let status = match &upload.outcome {
            UploadOutcome::Uploaded { url } => format!("{}", url.cyan()),
            UploadOutcome::Failed { reason } => format!("{} {}", "failed:".red().bold(), reason),
            UploadOutcome::Skipped => "skipped".dimmed().to_string(),
        };
        println!("  {} -> {}", upload.artifact.destination, status);
    }

    if !report.uploads.is_empty() && !report.fully_published() {
        println!("{}", "Not every artifact was published".yellow());
    }
}
