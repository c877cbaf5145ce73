//! Merge of stored pages into one ordered dataset
//!
//! Pages are replayed in ascending order. Primary items are appended as each
//! page is read; locked items are queued per page and only appended after the
//! last page, so every primary record precedes every locked record.

use crate::extract::{extract_checked, NumberFormat, SchemaDrift};
use crate::output::Dataset;
use crate::store::{PageStore, StoreResult};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};

/// Replays every stored page and builds the dataset
///
/// # Arguments
///
/// * `store` - The page store filled by the fetch loop
/// * `title` - Dataset title, used as the spreadsheet name
/// * `format` - Currency/decimal rules for amount parsing
///
/// # Returns
///
/// * `Ok(Dataset)` - Records in page order, locked items last
/// * `Err(StoreError)` - A stored page could not be read or decoded
pub fn merge<S: PageStore + ?Sized>(
    store: &S,
    title: &str,
    format: &NumberFormat,
) -> StoreResult<Dataset> {
    let mut dataset = Dataset::new(title);
    let mut locked_queue: VecDeque<(u32, Vec<Value>)> = VecDeque::new();
    let mut drift_counts: BTreeMap<(&'static str, &'static str), usize> = BTreeMap::new();
    let mut pages = 0;

    for page in store.list_in_order()? {
        let page = page?;
        pages += 1;

        append_items(&mut dataset, &page.items, format, &mut drift_counts);

        match page.locked_items {
            Some(locked) if !locked.is_empty() => {
                tracing::debug!(
                    "Deferring {} locked items from page {}",
                    locked.len(),
                    page.number
                );
                locked_queue.push_back((page.number, locked));
            }
            _ => {}
        }
    }

    let primary = dataset.len();

    while let Some((number, locked)) = locked_queue.pop_front() {
        tracing::debug!("Appending {} locked items from page {}", locked.len(), number);
        append_items(&mut dataset, &locked, format, &mut drift_counts);
    }

    for ((field, found), count) in &drift_counts {
        tracing::warn!(
            "{} value had unexpected type '{}' in {} records; left unknown",
            field,
            found,
            count
        );
    }

    tracing::info!(
        "Merged {} pages: {} records ({} locked)",
        pages,
        dataset.len(),
        dataset.len() - primary
    );

    Ok(dataset)
}

fn append_items(
    dataset: &mut Dataset,
    items: &[Value],
    format: &NumberFormat,
    drift_counts: &mut BTreeMap<(&'static str, &'static str), usize>,
) {
    for item in items {
        let (record, drift) = extract_checked(item, format);
        for SchemaDrift { field, found, .. } in drift {
            *drift_counts.entry((field, found)).or_default() += 1;
        }
        dataset.push(record);
    }
}
