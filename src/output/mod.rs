//! Output module for product records and crawl reports
//!
//! This module handles:
//! - The product record type and its JSON shape
//! - Exporting records as CSV and JSON
//! - Summarizing a run for the console

mod csv_export;
mod json_export;
mod record;
mod report;
mod traits;

pub use csv_export::{write_csv, CsvExporter, CSV_HEADER};
pub use json_export::{read_json, write_json, JsonExporter};
pub use record::{
    ProductRecord, CATEGORY_MISSING, CHARACTERISTICS_MISSING, DESCRIPTION_MISSING,
    EXTENDED_DESCRIPTION_MISSING, NAME_MISSING, PRICE_MISSING, SKU_MISSING,
};
pub use report::{print_report, CrawlReport};
pub use traits::{Exporter, OutputError, OutputResult};

use std::path::Path;

/// Runs every exporter over the same records, each to its own path
///
/// Stops at the first failing exporter.
pub fn export_all(
    records: &[ProductRecord],
    targets: &[(&dyn Exporter, &Path)],
) -> OutputResult<()> {
    for (exporter, path) in targets {
        exporter.export(records, path)?;
        tracing::info!(
            "Saved {} records as {} to {}",
            records.len(),
            exporter.format_name(),
            path.display()
        );
    }
    Ok(())
}
