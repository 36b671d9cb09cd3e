//! Structured (JSON) export

use crate::output::record::ProductRecord;
use crate::output::traits::{Exporter, OutputResult};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes records as a pretty-printed JSON array with 4-space indentation
///
/// Non-ASCII text is written literally rather than as `\u` escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn export(&self, records: &[ProductRecord], path: &Path) -> OutputResult<()> {
        let file = std::fs::File::create(path)?;
        write_json(records, std::io::BufWriter::new(file))
    }
}

/// Writes the JSON rendering of `records` to any writer
pub fn write_json<W: Write>(records: &[ProductRecord], mut writer: W) -> OutputResult<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Reads records back from a file written by [`JsonExporter`]
pub fn read_json(path: &Path) -> OutputResult<Vec<ProductRecord>> {
    let file = std::fs::File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}
