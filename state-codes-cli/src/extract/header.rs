//! Header row discovery

use calamine::Data;

/// Labels that must resolve before any row is read
pub const STATE_NAME: &str = "state name";
pub const STATE_CODE: &str = "state code";
pub const REQUIRED_COLUMNS: [&str; 2] = [STATE_NAME, STATE_CODE];

/// Trim and lower-case header text for comparison
pub fn normalize_header(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Expected header labels resolved to 1-based column indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderRow {
    columns: Vec<(String, usize)>,
}

impl HeaderRow {
    /// Match header cells against the expected labels.
    ///
    /// `cells` yields `(column, cell)` pairs left to right with 1-based columns.
    /// Only text cells take part. A label seen in more than one column keeps
    /// the leftmost column.
    pub fn discover<'a, I>(cells: I, expected: &[String]) -> Self
    where
        I: IntoIterator<Item = (usize, &'a Data)>,
    {
        let wanted: Vec<(String, &String)> = expected
            .iter()
            .map(|label| (normalize_header(label), label))
            .collect();

        let mut header = HeaderRow::default();

        for (column, cell) in cells {
            let text = match cell {
                Data::String(s) => normalize_header(s),
                _ => continue,
            };
            if text.is_empty() {
                continue;
            }

            if let Some((_, label)) = wanted.iter().find(|(norm, _)| *norm == text) {
                if header.column(label).is_none() {
                    header.columns.push(((*label).clone(), column));
                }
            }
        }

        header
    }

    /// Column index for a label, compared after normalization
    pub fn column(&self, label: &str) -> Option<usize> {
        let wanted = normalize_header(label);
        self.columns
            .iter()
            .find(|(l, _)| normalize_header(l) == wanted)
            .map(|(_, c)| *c)
    }

    /// Required labels that did not resolve, in required order
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|label| self.column(label).is_none())
            .map(|label| label.to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns.iter().map(|(l, c)| (l.as_str(), *c))
    }
}
