// src/fetch/pages.rs
// =============================================================================
// Downloads every candidate site concurrently.
//
// How it works:
// 1. Spawn one task per URL on the runtime's worker pool
// 2. Each task fetches its own URL (with timeout, and retries if enabled)
//    and returns its own result; tasks share nothing but the PageSource
// 3. Wait for ALL tasks to settle (join_all), then file each result under
//    its URL in the PageBatch
//
// A failed URL is just a failed slot. It never stops the other downloads.
// =============================================================================

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{PageBatch, PageBody};
use crate::config::CrawlConfig;
use crate::error::FetchError;
use crate::extract::{CandidateSet, CandidateUrl};
use crate::http::{fetch_bounded, PageSource, RequestOptions};

/// How each page download behaves.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Timeout (and headers) for one attempt
    pub options: RequestOptions,
    /// Extra attempts after a transient failure; 0 disables retrying
    pub retries: u32,
    /// Pause before each retry
    pub backoff: Duration,
}

impl FetchSettings {
    /// Page downloads use the transport's default headers, so no
    /// User-Agent is copied from the config.
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            options: RequestOptions::new(config.fetch_timeout()),
            retries: config.fetch_retries,
            backoff: config.retry_backoff(),
        }
    }
}

/// Fetches every URL in `urls`, one task each, and waits for all of them.
///
/// The returned batch has exactly one slot per input URL. An empty set
/// returns an empty batch without spawning anything.
pub async fn fetch_pages<S: PageSource>(
    source: Arc<S>,
    urls: CandidateSet,
    settings: &FetchSettings,
) -> PageBatch {
    let mut batch = PageBatch::new();
    if urls.is_empty() {
        return batch;
    }

    info!(count = urls.len(), "downloading candidate sites");

    let (urls, tasks): (Vec<_>, Vec<_>) = urls
        .into_iter()
        .map(|url| {
            let source = Arc::clone(&source);
            let settings = settings.clone();
            let task_url = url.clone();
            let task = tokio::spawn(async move {
                fetch_with_retry(source.as_ref(), &task_url, &settings).await
            });
            (url, task)
        })
        .unzip();

    // The join point: every task has settled after this line
    let settled = join_all(tasks).await;

    for (url, joined) in urls.into_iter().zip(settled) {
        let result = joined.unwrap_or_else(|e| {
            warn!(%url, error = %e, "download task did not complete");
            Err(FetchError::Request(format!("download task failed: {}", e)))
        });
        batch.insert(url, result);
    }

    info!(
        fetched = batch.success_count(),
        failed = batch.failure_count(),
        "downloads settled"
    );
    batch
}

// One URL, retried only for transient errors and only up to the limit.
async fn fetch_with_retry<S: PageSource>(
    source: &S,
    url: &CandidateUrl,
    settings: &FetchSettings,
) -> Result<PageBody, FetchError> {
    let mut attempt = 0;
    loop {
        match fetch_bounded(source, url.as_url(), &settings.options).await {
            Ok(text) => {
                debug!(%url, bytes = text.len(), "page downloaded");
                return Ok(PageBody::from(text));
            }
            Err(e) if e.is_transient() && attempt < settings.retries => {
                attempt += 1;
                debug!(%url, error = %e, attempt, "retrying download");
                tokio::time::sleep(settings.backoff).await;
            }
            Err(e) => {
                warn!(%url, error = %e, "download failed");
                return Err(e);
            }
        }
    }
}
