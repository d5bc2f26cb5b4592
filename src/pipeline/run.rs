// src/pipeline/run.rs
// =============================================================================
// The crawl orchestrator: query in, SignalReport out.
//
// Each stage runs as its own task on the tokio worker pool, and the next
// stage's task is only created once the previous one has settled:
//
//   spawn(search)          -> ResultsDocument   (async, network)
//   spawn_blocking(extract) -> CandidateSet      (CPU, HTML parsing)
//   spawn(fetch_pages)      -> PageBatch         (async, one task per URL)
//   spawn_blocking(scan)    -> SignalReport      (CPU, HTML parsing)
//
// Every value is moved into the next task, so no two stages ever touch the
// same data. The search is the only step allowed to fail the run.
// =============================================================================

use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{info, warn};
use url::Url;

use super::Stage;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError, Result};
use crate::extract::{extract_links, LinkRules, ResultsDocument};
use crate::fetch::{fetch_pages, FailedFetch, FetchSettings, PageBody};
use crate::http::{fetch_bounded, HttpSource, PageSource, RequestOptions};
use crate::scan::{scan_pages, SignalReport};

/// Everything a finished run knows.
///
/// `report` is the pipeline's real output. The counts and `failures` sit
/// next to it for observability; the report itself does not say how many
/// sites failed.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlOutcome {
    pub query: String,
    /// Distinct candidate sites found on the results page
    pub candidates: usize,
    /// Sites whose page was downloaded
    pub pages_fetched: usize,
    pub report: SignalReport,
    pub failures: Vec<FailedFetch>,
}

pub struct Pipeline<S> {
    source: Arc<S>,
    config: CrawlConfig,
}

impl Pipeline<HttpSource> {
    /// A pipeline that talks to the real network.
    pub fn with_http(config: CrawlConfig) -> Result<Self> {
        Self::new(HttpSource::new()?, config)
    }
}

impl<S: PageSource> Pipeline<S> {
    /// Validates `config` up front so a bad setting fails before any request.
    pub fn new(source: S, config: CrawlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source: Arc::new(source),
            config,
        })
    }

    /// Runs one crawl and returns its report.
    ///
    /// `Err` means the run failed as a whole (bad query, search failed or
    /// timed out) and there is no report. Individual sites that could not be
    /// fetched only shrink the report.
    pub async fn run(&self, query: &str) -> Result<SignalReport> {
        self.run_with_outcome(query).await.map(|outcome| outcome.report)
    }

    /// Like `run`, but also returns the counts and per-site failures.
    pub async fn run_with_outcome(&self, query: &str) -> Result<CrawlOutcome> {
        // Blank queries are rejected; anything else is sent exactly as given
        if query.trim().is_empty() {
            return Err(CrawlError::EmptyQuery);
        }

        let mut stage = Stage::Searching;
        info!(%stage, query, "crawl started");

        // Searching
        let search_url = self.search_url(query)?;
        let options = RequestOptions::new(self.config.search_timeout())
            .with_user_agent(self.config.user_agent.clone());
        let source = Arc::clone(&self.source);
        let searched = tokio::spawn(async move { search(source.as_ref(), search_url, &options).await })
            .await
            .map_err(|e| task_failed(stage, e))?;
        let document = match searched {
            Ok(document) => document,
            Err(e) => {
                warn!(stage = %Stage::Failed, error = %e, "search request failed");
                return Err(CrawlError::Search(e));
            }
        };

        // Extracting
        stage = stage.next();
        info!(%stage, bytes = document.raw.len(), "results page received");
        let rules = LinkRules::from_config(&self.config);
        let candidates = tokio::task::spawn_blocking(move || extract_links(document, &rules))
            .await
            .map_err(|e| task_failed(stage, e))?;
        let candidate_count = candidates.len();

        // Fetching
        stage = stage.next();
        info!(%stage, candidates = candidate_count, "fetching candidate sites");
        let settings = FetchSettings::from_config(&self.config);
        let source = Arc::clone(&self.source);
        let batch = tokio::spawn(async move { fetch_pages(source, candidates, &settings).await })
            .await
            .map_err(|e| task_failed(stage, e))?;
        let (pages, failures) = batch.into_parts();
        let pages_fetched = pages.len();

        // Scanning
        stage = stage.next();
        info!(%stage, pages = pages_fetched, failed = failures.len(), "scanning pages");
        let bodies: Vec<PageBody> = pages.into_iter().map(|(_, body)| body).collect();
        let report = tokio::task::spawn_blocking(move || scan_pages(bodies))
            .await
            .map_err(|e| task_failed(stage, e))?;

        stage = stage.next();
        info!(%stage, references = report.len(), "crawl finished");

        Ok(CrawlOutcome {
            query: query.to_string(),
            candidates: candidate_count,
            pages_fetched,
            report,
            failures,
        })
    }

    // <search_url>?q=<query>&num=<result_count>, query URL-encoded
    fn search_url(&self, query: &str) -> Result<Url> {
        let count = self.config.result_count.to_string();
        Url::parse_with_params(&self.config.search_url, [("q", query), ("num", count.as_str())])
            .map_err(|e| CrawlError::Config(format!("search_url '{}': {}", self.config.search_url, e)))
    }
}

// The one outbound request of the Searching stage.
async fn search<S: PageSource>(
    source: &S,
    url: Url,
    options: &RequestOptions,
) -> std::result::Result<ResultsDocument, FetchError> {
    info!(%url, "sending search request");
    let raw = fetch_bounded(source, &url, options).await?;
    Ok(ResultsDocument::new(url, raw))
}

fn task_failed(stage: Stage, error: JoinError) -> CrawlError {
    warn!(%stage, error = %error, "stage task did not complete");
    CrawlError::stage(stage, error)
}
