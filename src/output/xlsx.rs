//! XLSX encoding
//!
//! A single worksheet named after the dataset title, headers in row 1.

use crate::extract::Cell;
use crate::output::traits::{Exporter, OutputResult};
use crate::output::Dataset;
use rust_xlsxwriter::{Format, Workbook};

/// Excel limits worksheet names to 31 characters
const MAX_SHEET_NAME: usize = 31;

/// Spreadsheet exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

/// Turns a dataset title into a legal worksheet name
pub fn sheet_name(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let name = name.trim().trim_matches('\'').to_string();

    if name.is_empty() {
        "Ranking".to_string()
    } else {
        name
    }
}

impl Exporter for XlsxExporter {
    fn export(&self, dataset: &Dataset) -> OutputResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(dataset.title()))?;

        for (col, header) in (0u16..).zip(dataset.headers()) {
            worksheet.write_string_with_format(0, col, *header, &bold)?;
        }

        for (row, record) in (1u32..).zip(dataset.records()) {
            for (col, cell) in (0u16..).zip(record.cells()) {
                match cell {
                    Cell::Unknown => {}
                    Cell::Integer(value) => {
                        worksheet.write_number(row, col, f64::from(value))?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row, col, value)?;
                    }
                    Cell::Text(value) => {
                        worksheet.write_string(row, col, value)?;
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
