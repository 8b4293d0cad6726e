//! Adapters layer: Concrete implementations of ports.
//!
//! - `file_export`: writes the downloadable report into a directory
//! - `sanitize`: personal-data filtering for logs

pub mod file_export;
pub mod sanitize;

pub use file_export::{ExportError, FileReportSink};
