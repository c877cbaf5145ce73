//! HTTP fetcher implementation
//!
//! This module handles all requests to the search endpoint:
//! - Building the HTTP client with the configured user agent
//! - The single probe request that learns the page count
//! - The sequential fetch loop that fills the page store

use crate::config::SourceConfig;
use crate::crawler::PageRange;
use crate::source::SourceQuery;
use crate::store::PageStore;
use crate::RankerError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Pause after the probe request before the first page
pub const PROBE_PAUSE: Duration = Duration::from_secs(1);

/// A request the remote source refused or never answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// Full request URL, query included
    pub url: String,
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,
    /// Error description
    pub message: String,
}

impl TransportFailure {
    /// Extracts the failure details from a transport error
    ///
    /// Returns `None` for errors that did not come from the remote source.
    pub fn from_error(error: &RankerError) -> Option<Self> {
        match error {
            RankerError::Status { url, status } => Some(Self {
                url: url.clone(),
                status: Some(*status),
                message: error.to_string(),
            }),
            RankerError::Http { url, source } => Some(Self {
                url: url.clone(),
                status: source.status().map(|s| s.as_u16()),
                message: source.to_string(),
            }),
            _ => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The remote source configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page of search results
///
/// # Returns
///
/// * `Ok(Value)` - The page's JSON document
/// * `Err(RankerError::Status)` - The source answered with a non-2xx status
/// * `Err(RankerError::Http)` - No usable response arrived
pub async fn fetch_page(
    client: &Client,
    api_url: &str,
    query: &SourceQuery,
    page: u32,
) -> Result<Value, RankerError> {
    let request = client.get(api_url).query(&query.for_page(page)).build()?;
    let url = request.url().to_string();

    let response = client
        .execute(request)
        .await
        .map_err(|source| RankerError::Http {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RankerError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| RankerError::Http {
        url: url.clone(),
        source,
    })?;

    serde_json::from_str(&body).map_err(|e| RankerError::MalformedResponse {
        url,
        message: e.to_string(),
    })
}

/// Reads `data.total_pages` from a page document
pub fn total_pages(document: &Value) -> Option<u32> {
    match document.pointer("/data/total_pages")? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Requests page 1 once to learn how many pages the source holds
///
/// Nothing is stored; a failure here means no page was fetched at all.
pub async fn probe(
    client: &Client,
    api_url: &str,
    query: &SourceQuery,
) -> Result<u32, RankerError> {
    let document = fetch_page(client, api_url, query, 1).await?;

    let max_page = total_pages(&document).ok_or_else(|| RankerError::MalformedResponse {
        url: api_url.to_string(),
        message: "missing data.total_pages".to_string(),
    })?;

    tracing::debug!("Source reports {} pages", max_page);
    Ok(max_page)
}

/// Fetches every page in `range`, one at a time, into the store
///
/// Pages are requested in ascending order with `pause` slept after each one,
/// the last included. The first failure stops the loop; pages stored before
/// it stay in the store.
///
/// # Returns
///
/// * `Ok(usize)` - Number of pages stored
/// * `Err(RankerError)` - The request or store write that stopped the loop
pub async fn fetch_pages<S: PageStore + ?Sized>(
    client: &Client,
    api_url: &str,
    query: &SourceQuery,
    range: PageRange,
    pause: Duration,
    store: &mut S,
) -> Result<usize, RankerError> {
    let mut stored = 0;

    for page in range.pages() {
        let document = match fetch_page(client, api_url, query, page).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Stopping at page {}: {}", page, e);
                return Err(e);
            }
        };

        store.put(page, &document)?;
        stored += 1;

        tracing::info!("Fetched page {} ({}/{})", page, stored, range.len());

        tokio::time::sleep(pause).await;
    }

    Ok(stored)
}
