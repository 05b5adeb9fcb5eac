//! Cell values as they cross from the workbook into the state map

use calamine::Data;
use serde::{Deserialize, Serialize};

/// A state code exactly as the workbook holds it.
///
/// Serialized without a tag: numbers as JSON numbers, text as strings,
/// booleans as booleans and empty cells as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateCode {
    /// Numeric cell (whole numbers are kept as integers)
    Number(serde_json::Number),
    /// Text cell, or a date rendered as displayed
    Text(String),
    /// Boolean cell
    Bool(bool),
    /// Empty cell
    Empty,
}

impl StateCode {
    /// Read a code cell without coercion.
    ///
    /// Spreadsheet error cells (`#N/A`, `#REF!`, ...) are rejected with their
    /// raw text so the caller can skip the row.
    pub fn from_cell(cell: &Data) -> Result<Self, String> {
        match cell {
            Data::Empty => Ok(StateCode::Empty),
            Data::String(s) => Ok(StateCode::Text(s.clone())),
            Data::Int(i) => Ok(StateCode::Number((*i).into())),
            Data::Float(f) => Ok(float_code(*f)),
            Data::Bool(b) => Ok(StateCode::Bool(*b)),
            Data::DateTime(dt) => Ok(StateCode::Text(format!("{}", dt))),
            Data::DateTimeIso(s) => Ok(StateCode::Text(s.clone())),
            Data::DurationIso(s) => Ok(StateCode::Text(s.clone())),
            Data::Error(e) => Err(e.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StateCode::Empty)
    }
}

impl From<i64> for StateCode {
    fn from(value: i64) -> Self {
        StateCode::Number(value.into())
    }
}

impl From<&str> for StateCode {
    fn from(value: &str) -> Self {
        StateCode::Text(value.to_string())
    }
}

fn float_code(f: f64) -> StateCode {
    if is_whole(f) {
        return StateCode::Number((f as i64).into());
    }
    match serde_json::Number::from_f64(f) {
        Some(n) => StateCode::Number(n),
        // NaN and infinities have no JSON form
        None => StateCode::Text(f.to_string()),
    }
}

fn is_whole(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64
}

/// Text form of a cell, trimmed. `None` when the cell is empty or blank.
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if is_whole(*f) => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(e) => e.to_string(),
    };

    if text.is_empty() { None } else { Some(text) }
}
