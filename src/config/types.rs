use crate::extract::NumberFormat;
use crate::output::OutputFormat;
use serde::Deserialize;

/// Default starting page for a ranking run
pub const DEFAULT_START_URL: &str =
    "https://www.usnews.com/best-colleges/rankings/national-universities?_sort=rank&_sortDirection=asc";

/// Search endpoint behind the ranking pages
pub const DEFAULT_API_URL: &str = "https://www.usnews.com/best-colleges/api/search";

/// The search endpoint rejects unknown agents, so a browser string is sent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Main configuration structure for USNews-Ranker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub run: RunConfig,
    pub store: StoreConfig,
    #[serde(rename = "number-format")]
    pub number_format: NumberFormat,
}

/// Remote source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Ranking page the query parameters are derived from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// JSON search endpoint
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Run parameters, each overridable from the command line
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Pause between consecutive page requests (seconds, clamped to 1..=10)
    #[serde(rename = "pause-secs")]
    pub pause_secs: i64,

    /// First page to fetch
    #[serde(rename = "start-page")]
    pub start_page: i64,

    /// Last page to fetch
    #[serde(rename = "end-page")]
    pub end_page: i64,

    /// Output encoding
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pause_secs: 2,
            start_page: 1,
            end_page: 10,
            format: OutputFormat::Xlsx,
        }
    }
}

/// Intermediate page store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one file per fetched page
    #[serde(rename = "temp-dir")]
    pub temp_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            temp_dir: "./temp".to_string(),
        }
    }
}
