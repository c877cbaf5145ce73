//! Directory-backed page store
//!
//! Pages live as `NNNN.json` files. The fixed key width makes lexical and
//! numeric order agree, but replay still indexes by page number and sorts.

use crate::store::traits::{PageStore, StoreError, StoreResult, StoredPages};
use crate::store::{RawPage, MAX_PAGE, PAGE_KEY_WIDTH};
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";
const PARTIAL_EXTENSION: &str = "part";

/// Returns the file name used for a page slot, e.g. `0007.json`
pub fn page_file_name(page: u32) -> String {
    format!("{:0width$}.{}", page, EXTENSION, width = PAGE_KEY_WIDTH)
}

/// Parses a slot file name back into its page number
fn parse_page_file_name(name: &str) -> Option<u32> {
    parse_page_key(name.strip_suffix(EXTENSION)?.strip_suffix('.')?)
}

/// True for files the store itself writes: finished slots and partial writes
fn is_owned_file_name(name: &str) -> bool {
    parse_page_file_name(name).is_some()
        || name
            .strip_suffix(PARTIAL_EXTENSION)
            .and_then(|rest| rest.strip_suffix('.'))
            .and_then(parse_page_key)
            .is_some()
}

fn parse_page_key(stem: &str) -> Option<u32> {
    if stem.len() != PAGE_KEY_WIDTH || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// Page store writing one file per page into a directory
#[derive(Debug, Clone)]
pub struct DirPageStore {
    root: PathBuf,
}

impl DirPageStore {
    /// Creates a store rooted at `root`; nothing is touched on disk yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the page files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a page slot
    pub fn page_path(&self, page: u32) -> PathBuf {
        self.root.join(page_file_name(page))
    }

    /// Scans the directory and returns `(page, path)` pairs sorted by page
    fn index(&self) -> StoreResult<Vec<(u32, PathBuf)>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut index = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(page) = name.to_str().and_then(parse_page_file_name) {
                index.push((page, entry.path()));
            }
        }

        index.sort_by_key(|(page, _)| *page);
        Ok(index)
    }
}

impl PageStore for DirPageStore {
    fn put(&mut self, page: u32, body: &Value) -> StoreResult<()> {
        if page == 0 || page > MAX_PAGE {
            return Err(StoreError::PageOutOfRange(page));
        }

        fs::create_dir_all(&self.root)?;

        // Write beside the slot and rename so a crash never leaves half a page
        let path = self.page_path(page);
        let partial = path.with_extension(PARTIAL_EXTENSION);
        {
            let mut file = fs::File::create(&partial)?;
            serde_json::to_writer(&mut file, body)?;
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&partial, &path)?;

        tracing::debug!("Stored page {} at {}", page, path.display());
        Ok(())
    }

    fn list_in_order(&self) -> StoreResult<StoredPages<'_>> {
        let pages = self.index()?.into_iter().map(|(page, path)| {
            let text = fs::read_to_string(&path)?;
            let document: Value = serde_json::from_str(&text).map_err(|source| {
                StoreError::Corrupt {
                    page,
                    path: path.clone(),
                    source,
                }
            })?;
            RawPage::from_value(page, document).map_err(|source| StoreError::Corrupt {
                page,
                path,
                source,
            })
        });
        Ok(Box::new(pages))
    }

    fn page_numbers(&self) -> StoreResult<Vec<u32>> {
        Ok(self.index()?.into_iter().map(|(page, _)| page).collect())
    }

    fn reset(&mut self) -> StoreResult<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        // Only slot files are removed; anything else in the directory is left alone
        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if entry.file_name().to_str().is_some_and(is_owned_file_name) {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        if fs::read_dir(&self.root)?.next().is_none() {
            fs::remove_dir(&self.root)?;
            tracing::debug!("Removed page store at {}", self.root.display());
        } else {
            tracing::debug!(
                "Cleared {} page files, kept {} since it holds other files",
                removed,
                self.root.display()
            );
        }

        Ok(())
    }
}
