//! Crawler module for paginated collection
//!
//! This module contains the core collection logic, including:
//! - Page range planning against the source's page count
//! - HTTP fetching of single pages and the sequential fetch loop
//! - Overall run coordination from probe to export

mod coordinator;
mod fetcher;
mod planner;

pub use coordinator::{scrape, Ranker, RunMode, RunOptions, RunOutcome, RunReport};
pub use fetcher::{
    build_http_client, fetch_page, fetch_pages, probe, total_pages, TransportFailure, PROBE_PAUSE,
};
pub use planner::{clamp_pause, plan, PageRange, MAX_PAUSE_SECS, MIN_PAUSE_SECS};
