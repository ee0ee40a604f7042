//! Persistent data model: reports, rows, and cell values.

pub mod report;

pub use report::{CellValue, Report, Row};
