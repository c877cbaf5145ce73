//! Configuration module for USNews-Ranker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; missing keys fall back to the values the public
//! ranking site is known to accept.
//!
//! # Example
//!
//! ```no_run
//! use usnews_ranker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ranker.toml")).unwrap();
//! println!("Pausing {}s between pages", config.run.pause_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, RunConfig, SourceConfig, StoreConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
