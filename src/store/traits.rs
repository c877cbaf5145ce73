//! Page store trait and error types

use crate::store::RawPage;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during page store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page {0} is outside the storable range")]
    PageOutOfRange(u32),

    #[error("Stored page {page} at {path} is corrupt: {source}")]
    Corrupt {
        page: u32,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for page store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Pages replayed from a store, in ascending page order
///
/// The sequence is lazy: each page is read and decoded only when reached.
pub type StoredPages<'a> = Box<dyn Iterator<Item = StoreResult<RawPage>> + 'a>;

/// Trait for intermediate page storage
///
/// A run has exactly one writer (the fetch loop) followed by exactly one
/// reader (the merge), so implementations need no locking.
pub trait PageStore {
    /// Writes the raw JSON of one page, creating the store if missing
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number, at most [`crate::store::MAX_PAGE`]
    /// * `body` - The page's JSON document as returned by the source
    fn put(&mut self, page: u32, body: &Value) -> StoreResult<()>;

    /// Returns the stored pages in ascending page-number order
    fn list_in_order(&self) -> StoreResult<StoredPages<'_>>;

    /// Returns the page numbers currently stored, ascending
    fn page_numbers(&self) -> StoreResult<Vec<u32>>;

    /// Destroys every stored page
    ///
    /// Only the store's own entries are removed; unrelated data sharing the
    /// location survives. Idempotent, and safe to call when the store does
    /// not exist yet.
    fn reset(&mut self) -> StoreResult<()>;
}
