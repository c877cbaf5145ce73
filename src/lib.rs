//! USNews-Ranker: a polite ranking collector
//!
//! This crate pages through the U.S. News college search API, keeps every raw
//! page in a temporary on-disk store, normalizes each institution into a fixed
//! 11-column record and exports the merged table as XLSX, CSV or HTML.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod merge;
pub mod output;
pub mod source;
pub mod store;

use thiserror::Error;

/// Main error type for USNews-Ranker operations
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Page store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Export error: {0}")]
    Export(#[from] output::OutputError),

    #[error("Run aborted at {url}: {message}")]
    Aborted { url: String, message: String },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for USNews-Ranker operations
pub type Result<T> = std::result::Result<T, RankerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{plan, scrape, PageRange, Ranker, RunMode, RunOptions, RunOutcome, RunReport};
pub use extract::{extract, NumberFormat, Record};
pub use merge::merge;
pub use output::{Dataset, OutputFormat};
pub use store::{DirPageStore, PageStore};
