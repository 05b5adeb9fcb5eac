//! Read state names and codes from an Excel workbook

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use super::header::{HeaderRow, STATE_CODE, STATE_NAME};
use super::state_map::UniqueStateMap;
use super::value::{StateCode, cell_text};
use crate::error::GenerateError;

/// Stand-in for cells outside the sheet's used range
static EMPTY_CELL: Data = Data::Empty;

/// Result of scanning the state sheet
#[derive(Debug, Clone, Default)]
pub struct SheetScan {
    /// Resolved header columns
    pub header: HeaderRow,
    /// Unique state name to code pairs
    pub states: UniqueStateMap,
    /// Data rows read before the blank terminator (skipped rows excluded)
    pub rows_processed: usize,
    /// Rows dropped for a blank name or a spreadsheet error in the code cell
    pub rows_skipped: usize,
}

/// Open a workbook, find the state sheet and scan it.
///
/// The workbook is closed before this returns, whatever the outcome.
pub fn read_state_codes(
    path: &Path,
    sheet_title: &str,
    expected_headers: &[String],
) -> Result<SheetScan, GenerateError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| GenerateError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let available = workbook.sheet_names();
    log::info!("Workbook sheets: {:?}", available);

    if !available.iter().any(|name| name == sheet_title) {
        return Err(GenerateError::SheetNotFound {
            sheet: sheet_title.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet_title)
        .map_err(|e| GenerateError::SheetUnreadable {
            sheet: sheet_title.to_string(),
            reason: e.to_string(),
        })?;

    log::info!("Expected headers: {:?}", expected_headers);
    let scan = scan_range(&range, expected_headers);

    drop(workbook);
    log::debug!("Closed workbook {}", path.display());

    scan
}

/// Scan a sheet's cells: header discovery on row 1, data from row 2 until the
/// first blank state name.
pub fn scan_range(range: &Range<Data>, expected_headers: &[String]) -> Result<SheetScan, GenerateError> {
    let header = read_header(range, expected_headers);
    log::info!(
        "Found column indices: {:?}",
        header.iter().collect::<Vec<_>>()
    );

    let (Some(name_col), Some(code_col)) = (header.column(STATE_NAME), header.column(STATE_CODE))
    else {
        return Err(GenerateError::MissingRequiredColumns {
            missing: header.missing_required(),
        });
    };
    // Header columns are 1-based, cell positions are not
    let (name_col, code_col) = (name_col as u32 - 1, code_col as u32 - 1);

    let mut scan = SheetScan {
        header,
        ..Default::default()
    };

    let mut row: u32 = 1;
    loop {
        let name_cell = range.get_value((row, name_col)).unwrap_or(&EMPTY_CELL);
        if is_end_of_data(name_cell) {
            break;
        }

        let Some(name) = cell_text(name_cell) else {
            log::warn!("Blank state name at row {}, skipping", row + 1);
            scan.rows_skipped += 1;
            row += 1;
            continue;
        };

        let code_cell = range.get_value((row, code_col)).unwrap_or(&EMPTY_CELL);
        match StateCode::from_cell(code_cell) {
            Ok(code) => {
                if code.is_empty() {
                    log::debug!("Empty state code for {} at row {}", name, row + 1);
                }
                scan.states.insert_first(name, code);
                scan.rows_processed += 1;
            }
            Err(raw) => {
                log::warn!("Invalid state code at row {}: {}", row + 1, raw);
                scan.rows_skipped += 1;
            }
        }

        row += 1;
    }

    log::info!(
        "Processed {} rows, found {} unique states",
        scan.rows_processed,
        scan.states.len()
    );

    Ok(scan)
}

/// Only a truly empty name cell ends the data; blank text does not
fn is_end_of_data(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

fn read_header(range: &Range<Data>, expected_headers: &[String]) -> HeaderRow {
    let last_col = match range.end() {
        Some((_, col)) => col,
        None => return HeaderRow::default(),
    };

    let cells = (0..=last_col).filter_map(|col| {
        range
            .get_value((0, col))
            .map(|cell| (col as usize + 1, cell))
    });

    HeaderRow::discover(cells, expected_headers)
}
