//! Output module for exporting the merged dataset
//!
//! This module handles:
//! - The ordered dataset handed over by the merge
//! - Encoding it as XLSX, CSV or HTML
//! - Writing `<name>.<format>` as one whole-file rewrite

mod csv_export;
mod dataset;
mod html;
mod traits;
mod xlsx;

pub use csv_export::CsvExporter;
pub use dataset::Dataset;
pub use html::{HtmlExporter, HTML_UNKNOWN};
pub use traits::{Exporter, OutputError, OutputResult};
pub use xlsx::{sheet_name, XlsxExporter};

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Html,
}

impl OutputFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }

    /// Returns the exporter for this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Xlsx => Box::new(XlsxExporter),
            Self::Csv => Box::new(CsvExporter),
            Self::Html => Box::new(HtmlExporter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encodes a dataset in the given format
pub fn export(dataset: &Dataset, format: OutputFormat) -> OutputResult<Vec<u8>> {
    format.exporter().export(dataset)
}

/// Path of the output file for a base name, e.g. `ranking.csv`
pub fn output_path(dir: &Path, name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", name, format.extension()))
}

/// Encodes the dataset and writes it to `<dir>/<name>.<format>`
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Encoding or writing failed; nothing is retried
pub fn write_output(
    dataset: &Dataset,
    format: OutputFormat,
    dir: &Path,
    name: &str,
) -> OutputResult<PathBuf> {
    let bytes = export(dataset, format)?;
    let path = output_path(dir, name, format);

    std::fs::write(&path, bytes)?;
    tracing::info!("Wrote {} records to {}", dataset.len(), path.display());

    Ok(path)
}
