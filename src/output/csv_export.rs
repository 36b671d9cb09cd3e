//! Tabular (CSV) export

use crate::output::record::ProductRecord;
use crate::output::traits::{Exporter, OutputResult};
use std::io::Write;
use std::path::Path;

/// Column names of the CSV header, in order
pub const CSV_HEADER: [&str; 8] = [
    "Product Code",
    "Product Name",
    "Category",
    "Price",
    "Description",
    "Additional Description",
    "Image URL",
    "Features",
];

/// Writes records as comma-delimited UTF-8 with one header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn export(&self, records: &[ProductRecord], path: &Path) -> OutputResult<()> {
        let file = std::fs::File::create(path)?;
        write_csv(records, file)
    }
}

/// Writes the CSV rendering of `records` to any writer
///
/// The image list is joined with newlines into the single `Image URL` cell;
/// the CSV writer quotes such multi-line cells.
pub fn write_csv<W: Write>(records: &[ProductRecord], writer: W) -> OutputResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for record in records {
        let images = record.images.join("\n");
        wtr.write_record([
            record.sku.as_str(),
            record.name.as_str(),
            record.category.as_str(),
            record.price.as_str(),
            record.description.as_str(),
            record.extended_description.as_str(),
            images.as_str(),
            record.characteristics.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
