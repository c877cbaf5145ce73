//! Record extraction module
//!
//! This module turns one raw institution object from the search API into a
//! fixed-shape [`Record`]. It contains:
//! - The 11-field record and its column headers
//! - Explicit currency/decimal formatting rules
//! - The per-field extractor with schema-drift detection

mod extractor;
mod number;
mod record;

pub use extractor::{extract, extract_checked, try_extract, SchemaDrift};
pub use number::NumberFormat;
pub use record::{Cell, Record, COLUMN_HEADERS};
