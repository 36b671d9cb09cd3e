//! Exporter trait and output errors

use crate::output::record::ProductRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes a sequence of product records to a file
///
/// Implementations preserve record order, accept an empty sequence, and
/// overwrite the destination unconditionally.
pub trait Exporter {
    /// Short name used in log lines (e.g. "csv")
    fn format_name(&self) -> &'static str;

    /// Writes `records` to `path`
    fn export(&self, records: &[ProductRecord], path: &Path) -> OutputResult<()>;
}
