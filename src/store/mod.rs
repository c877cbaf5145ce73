//! Page store module for persisting fetched pages
//!
//! Every fetched page is written once to a slot keyed by its zero-padded page
//! number, then replayed in ascending page order during the merge. The store
//! is temporary: it is reset when a run starts and removed when it ends.

mod dir;
mod page;
mod traits;

pub use dir::{page_file_name, DirPageStore};
pub use page::RawPage;
pub use traits::{PageStore, StoreError, StoreResult, StoredPages};

/// Highest page number the store can key
pub const MAX_PAGE: u32 = 9999;

/// Width of the zero-padded page key, enough digits for [`MAX_PAGE`]
pub const PAGE_KEY_WIDTH: usize = 4;
