//! Command-line interface

pub mod handler;

use clap::Parser;
use std::path::PathBuf;

pub use handler::handle_generate;

/// Extract state codes from a workbook and publish them as JSON
#[derive(Debug, Parser)]
#[command(name = "state-codes", version, about)]
pub struct Cli {
    /// Workbook (.xlsx) holding the state and district details sheet
    pub workbook: PathBuf,

    /// Config file (defaults to <config dir>/state-codes/config.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for state_code_details.json and india.json
    #[arg(long)]
    pub pages_dir: Option<PathBuf>,

    /// Target bucket (overrides BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Write the JSON file but do not upload anything
    #[arg(long)]
    pub skip_upload: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
