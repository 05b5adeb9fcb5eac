//! Write the state map as a JSON document

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::extract::UniqueStateMap;

const INDENT: &[u8] = b"    ";

/// Serialize as pretty JSON with a four-space indent.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_pretty_json(states: &UniqueStateMap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    states
        .serialize(&mut ser)
        .context("Failed to serialize state codes")?;
    Ok(buf)
}

/// Write the state map to `path`, replacing any existing file
pub fn write_state_codes(path: &Path, states: &UniqueStateMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let json = to_pretty_json(states)?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}
