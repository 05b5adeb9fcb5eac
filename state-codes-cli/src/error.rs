//! Errors that stop a generation run

use std::path::PathBuf;

use thiserror::Error;

/// A failure that aborts the remainder of a run.
///
/// Earlier side effects are left in place; nothing is rolled back.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to open workbook {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("no sheet title configured for key '{0}'")]
    UnknownSheetKey(String),

    #[error("sheet '{sheet}' not found, available sheets: {available:?}")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("failed to read sheet '{sheet}': {reason}")]
    SheetUnreadable { sheet: String, reason: String },

    #[error("missing required columns: {missing:?}")]
    MissingRequiredColumns { missing: Vec<String> },

    #[error("failed to write {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },
}
