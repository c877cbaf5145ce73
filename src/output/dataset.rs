use crate::extract::{Record, COLUMN_HEADERS};
use crate::output::{CsvExporter, Exporter, OutputResult};
use chrono::NaiveDate;

/// The ordered table handed to an exporter
///
/// Records keep the order they were appended in; duplicates are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    title: String,
    records: Vec<Record>,
    collected_on: Option<NaiveDate>,
}

impl Dataset {
    /// Creates an empty dataset
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            records: Vec::new(),
            collected_on: None,
        }
    }

    /// Title used for the worksheet and the HTML page
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Column headers, fixed for every dataset
    pub fn headers(&self) -> &'static [&'static str] {
        &COLUMN_HEADERS
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends one record at the end
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Date the ranking was collected, if stamped
    pub fn collected_on(&self) -> Option<NaiveDate> {
        self.collected_on
    }

    /// Stamps the collection date
    pub fn with_collected_on(mut self, date: NaiveDate) -> Self {
        self.collected_on = Some(date);
        self
    }

    /// Renders the dataset as CSV text
    pub fn to_csv(&self) -> OutputResult<String> {
        let bytes = CsvExporter.export(self)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
