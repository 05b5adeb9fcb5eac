//! Extract state name to state code mappings from a workbook and publish them
//! as JSON to object storage.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod output;
pub mod upload;

pub use error::GenerateError;
pub use generator::{GenerateReport, generate};
