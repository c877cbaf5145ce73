//! Ranking run coordinator - main pipeline orchestration
//!
//! This module wires the pipeline together:
//! - Resetting the page store and any stale output file
//! - Probing the source and planning the page range
//! - Running the fetch loop
//! - Merging stored pages and exporting the dataset
//! - Removing the temporary store

use crate::config::Config;
use crate::ConfigError;
use crate::crawler::fetcher::{build_http_client, fetch_pages, probe, TransportFailure, PROBE_PAUSE};
use crate::crawler::planner::{clamp_pause, plan, PageRange};
use crate::merge::merge;
use crate::output::{output_path, write_output, OutputFormat};
use crate::source::SourceQuery;
use crate::store::{DirPageStore, PageStore};
use crate::RankerError;
use reqwest::Client;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// How the caller wants failures delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Command-line use: transport failures are reported in the outcome
    /// and the run carries on with whatever was stored
    Standalone,
    /// Library use: transport failures are returned as errors
    Embedded,
}

/// Everything a run needs besides the network
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: Config,
    /// Output file name without extension
    pub output_name: String,
    /// Directory the output file is written to
    pub output_dir: PathBuf,
}

impl RunOptions {
    /// Options with default configuration, writing to the working directory
    pub fn new(output_name: impl Into<String>) -> Self {
        Self {
            config: Config::default(),
            output_name: output_name.into(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Final output path, `<output_dir>/<output_name>.<format>`
    pub fn output_path(&self) -> PathBuf {
        output_path(&self.output_dir, &self.output_name, self.config.run.format)
    }
}

/// Summary of a run that produced an output file
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub range: PageRange,
    pub pause: Duration,
    pub pages_stored: usize,
    pub records: usize,
    /// Set when the fetch loop stopped early in standalone mode
    pub interrupted: Option<TransportFailure>,
}

/// Result of a run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// An output file was written
    Exported(RunReport),
    /// The probe request failed in standalone mode; nothing was written
    Aborted(TransportFailure),
}

/// Main ranking run coordinator
pub struct Ranker {
    options: RunOptions,
    query: SourceQuery,
    store: DirPageStore,
    client: Client,
}

impl Ranker {
    /// Creates a new coordinator
    ///
    /// # Returns
    ///
    /// * `Ok(Ranker)` - Ready to run
    /// * `Err(RankerError)` - The start URL is invalid, the page store would
    ///   enclose the output directory, or the client could not be built
    pub fn new(options: RunOptions) -> Result<Self, RankerError> {
        check_store_location(Path::new(&options.config.store.temp_dir), &options.output_dir)?;

        let query = SourceQuery::from_start_url(&options.config.source.start_url)?;
        let store = DirPageStore::new(&options.config.store.temp_dir);
        let client = build_http_client(&options.config.source)?;

        Ok(Self {
            options,
            query,
            store,
            client,
        })
    }

    /// Title the dataset will carry
    pub fn title(&self) -> &str {
        self.query.title()
    }

    /// The page store used for this run
    pub fn store(&self) -> &DirPageStore {
        &self.store
    }

    /// Runs the whole pipeline
    ///
    /// The temporary page store is removed afterwards, whether the run
    /// succeeded or not.
    pub async fn run(&mut self, mode: RunMode) -> Result<RunOutcome, RankerError> {
        let result = self.run_pipeline(mode).await;

        if let Err(e) = self.store.reset() {
            tracing::warn!("Failed to remove page store {}: {}", self.store.root().display(), e);
        }

        result
    }

    async fn run_pipeline(&mut self, mode: RunMode) -> Result<RunOutcome, RankerError> {
        let output = self.options.output_path();

        self.store.reset()?;
        remove_stale_output(&output)?;

        let api_url = self.options.config.source.api_url.clone();

        let max_page = match probe(&self.client, &api_url, &self.query).await {
            Ok(max_page) => max_page,
            Err(e) => {
                return match (mode, TransportFailure::from_error(&e)) {
                    (RunMode::Standalone, Some(failure)) => {
                        tracing::error!("Probe request failed: {}", e);
                        Ok(RunOutcome::Aborted(failure))
                    }
                    _ => Err(e),
                };
            }
        };
        tokio::time::sleep(PROBE_PAUSE).await;

        let run = &self.options.config.run;
        let range = plan(max_page, run.start_page, run.end_page);
        let pause = clamp_pause(run.pause_secs);
        let format = run.format;

        tracing::info!(
            "Collecting \"{}\" from page {} to page {} with a pause of {}s",
            self.options.config.source.start_url,
            range.start,
            range.end,
            pause.as_secs()
        );

        let mut interrupted = None;
        let fetched =
            fetch_pages(&self.client, &api_url, &self.query, range, pause, &mut self.store).await;
        if let Err(e) = fetched {
            match (mode, TransportFailure::from_error(&e)) {
                (RunMode::Standalone, Some(failure)) => interrupted = Some(failure),
                _ => return Err(e),
            }
        }
        let pages_stored = self.store.page_numbers()?.len();

        let dataset = merge(
            &self.store,
            self.query.title(),
            &self.options.config.number_format,
        )?
        .with_collected_on(chrono::Local::now().date_naive());

        let written = write_output(
            &dataset,
            format,
            &self.options.output_dir,
            &self.options.output_name,
        )?;

        Ok(RunOutcome::Exported(RunReport {
            output: written,
            format,
            range,
            pause,
            pages_stored,
            records: dataset.len(),
            interrupted,
        }))
    }
}

/// The page store is cleared after every run, so it must not enclose the output
fn check_store_location(store: &Path, output_dir: &Path) -> Result<(), RankerError> {
    let store = absolute(store)?;
    let output_dir = absolute(output_dir)?;

    if output_dir.starts_with(&store) {
        return Err(ConfigError::Validation(format!(
            "temp-dir '{}' must not be or contain the output directory '{}'",
            store.display(),
            output_dir.display()
        ))
        .into());
    }
    Ok(())
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

fn remove_stale_output(path: &Path) -> Result<(), RankerError> {
    if path.is_file() {
        tracing::debug!("Removing previous output {}", path.display());
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Runs a complete ranking collection and returns the output file's path
///
/// Transport errors are returned to the caller and nothing is printed.
///
/// # Example
///
/// ```no_run
/// use usnews_ranker::crawler::{scrape, RunOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut options = RunOptions::new("colleges");
/// options.config.run.end_page = 3;
/// let path = scrape(options).await?;
/// println!("Saved to {}", path.display());
/// # Ok(())
/// # }
/// ```
pub async fn scrape(options: RunOptions) -> Result<PathBuf, RankerError> {
    let mut ranker = Ranker::new(options)?;

    match ranker.run(RunMode::Embedded).await? {
        RunOutcome::Exported(report) => {
            if report.output.is_absolute() {
                Ok(report.output)
            } else {
                Ok(std::env::current_dir()?.join(report.output))
            }
        }
        RunOutcome::Aborted(failure) => Err(RankerError::Aborted {
            url: failure.url,
            message: failure.message,
        }),
    }
}
