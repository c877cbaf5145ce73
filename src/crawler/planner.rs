//! Page range planning and pause clamping

use crate::store::MAX_PAGE;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Shortest pause allowed between page requests (seconds)
pub const MIN_PAUSE_SECS: i64 = 1;

/// Longest pause allowed between page requests (seconds)
pub const MAX_PAUSE_SECS: i64 = 10;

/// An inclusive, non-empty range of 1-based page numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Page numbers in ascending order
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of pages in the range
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// A planned range always holds at least one page
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Computes the range of pages to fetch
///
/// `end` is clamped to `[1, max_page]` and `start` raised to at least 1. If
/// `start` ends up past `end`, both collapse to the smaller one so a single
/// page is fetched instead of none.
///
/// # Example
///
/// ```
/// use usnews_ranker::crawler::{plan, PageRange};
///
/// assert_eq!(plan(10, 3, 7), PageRange { start: 3, end: 7 });
/// assert_eq!(plan(10, 1, 999), PageRange { start: 1, end: 10 });
/// assert_eq!(plan(10, 8, 3), PageRange { start: 3, end: 3 });
/// ```
pub fn plan(max_page: u32, requested_start: i64, requested_end: i64) -> PageRange {
    // A source reporting zero pages still serves page 1
    let max_page = i64::from(max_page.clamp(1, MAX_PAGE));

    let mut end = requested_end.clamp(1, max_page);
    let mut start = requested_start.max(1);

    if start > end {
        start = start.min(end);
        end = start;
    }

    // 1 <= start <= end <= MAX_PAGE
    PageRange {
        start: start as u32,
        end: end as u32,
    }
}

/// Clamps a requested pause to `[MIN_PAUSE_SECS, MAX_PAUSE_SECS]`
pub fn clamp_pause(seconds: i64) -> Duration {
    Duration::from_secs(seconds.clamp(MIN_PAUSE_SECS, MAX_PAUSE_SECS) as u64)
}
