//! CSV encoding
//!
//! Headers first, then one line per record. Unknown cells are empty and
//! lines end with `\n` on every platform.

use crate::output::traits::{Exporter, OutputError, OutputResult};
use crate::output::Dataset;
use csv::{Terminator, WriterBuilder};

/// Comma-separated exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, dataset: &Dataset) -> OutputResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(dataset.headers())?;
        for record in dataset.records() {
            writer.write_record(record.cells().iter().map(|cell| cell.render("")))?;
        }

        writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}
