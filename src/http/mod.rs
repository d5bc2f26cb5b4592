// src/http/mod.rs
// =============================================================================
// The HTTP capability the pipeline talks through.
//
// The crawl core never touches reqwest directly. It asks a PageSource to
// "fetch this URL with these options" and gets back the body text or a
// FetchError. That keeps the stages testable with an in-memory source and
// leaves transport details (TLS, redirects, connection pooling) in one place.
//
// Submodules:
// - client: the real reqwest-backed PageSource
// =============================================================================

mod client;

pub use client::HttpSource;

use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;

/// Per-request settings the caller controls.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Hard upper bound on the whole request, body included
    pub timeout: Duration,
    /// User-Agent header; `None` leaves the transport default
    pub user_agent: Option<String>,
}

impl RequestOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Something that can turn a URL into page text.
///
/// Implementations must be `Send + Sync + 'static` because every download
/// runs as its own task on the runtime's worker pool.
pub trait PageSource: Send + Sync + 'static {
    /// Fetches `url` and returns the response body as text.
    ///
    /// Non-2xx responses are errors (`FetchError::Status`).
    fn fetch(
        &self,
        url: &Url,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Runs one fetch under `options.timeout`, whatever the source does.
///
/// An elapsed timer becomes `FetchError::Timeout`, so a slow host can never
/// hold a stage open longer than its budget.
pub async fn fetch_bounded<S: PageSource>(
    source: &S,
    url: &Url,
    options: &RequestOptions,
) -> Result<String, FetchError> {
    match tokio::time::timeout(options.timeout, source.fetch(url, options)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(FetchError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowSource;

    impl PageSource for SlowSource {
        async fn fetch(&self, _url: &Url, _options: &RequestOptions) -> Result<String, FetchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    struct EchoSource;

    impl PageSource for EchoSource {
        async fn fetch(&self, url: &Url, options: &RequestOptions) -> Result<String, FetchError> {
            Ok(format!("{} {}", url, options.user_agent.as_deref().unwrap_or("-")))
        }
    }

    #[tokio::test]
    async fn bounded_fetch_times_out() {
        let url = Url::parse("http://slow.example.com/").unwrap();
        let options = RequestOptions::new(Duration::from_millis(20));
        let result = fetch_bounded(&SlowSource, &url, &options).await;
        assert_eq!(result, Err(FetchError::Timeout));
    }

    #[tokio::test]
    async fn bounded_fetch_passes_options_through() {
        let url = Url::parse("http://example.com/").unwrap();
        let options = RequestOptions::new(Duration::from_secs(1)).with_user_agent("scout/1.0");
        let body = fetch_bounded(&EchoSource, &url, &options).await.unwrap();
        assert_eq!(body, "http://example.com/ scout/1.0");
    }
}
