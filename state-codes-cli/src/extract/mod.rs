//! Workbook extraction of state name to state code pairs

pub mod header;
pub mod reader;
pub mod state_map;
pub mod value;

pub use header::{HeaderRow, normalize_header};
pub use reader::{SheetScan, read_state_codes, scan_range};
pub use state_map::UniqueStateMap;
pub use value::StateCode;
