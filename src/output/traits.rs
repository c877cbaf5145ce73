//! Exporter trait and error types
//!
//! This module defines the trait every output encoding implements and the
//! errors an export can raise.

use crate::output::Dataset;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output encoders
///
/// An exporter turns a finished dataset into the complete bytes of one
/// output file. Files are always rewritten whole, never appended to.
pub trait Exporter {
    /// Encodes the dataset
    ///
    /// # Arguments
    ///
    /// * `dataset` - The merged dataset, headers included
    ///
    /// # Returns
    ///
    /// The full file contents
    fn export(&self, dataset: &Dataset) -> OutputResult<Vec<u8>>;
}
