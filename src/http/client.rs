// src/http/client.rs
// =============================================================================
// The reqwest-backed PageSource.
//
// One Client is built up front and shared by every request (reqwest clients
// are reference counted internally, so clones are cheap and share the
// connection pool). Each call is a plain GET; anything outside 2xx is an
// error, and reqwest failures are sorted into FetchError kinds.
// =============================================================================

use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::error::Error as StdError;
use tracing::debug;
use url::Url;

use super::{PageSource, RequestOptions};
use crate::error::{CrawlError, FetchError};

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Builds a client that follows up to 10 redirects.
    ///
    /// No client-wide timeout: each request carries its own from
    /// `RequestOptions`.
    pub fn new() -> Result<Self, CrawlError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| CrawlError::Client(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url, options: &RequestOptions) -> Result<String, FetchError> {
        let mut request = self.client.get(url.clone()).timeout(options.timeout);
        if let Some(ua) = &options.user_agent {
            request = request.header(USER_AGENT, ua);
        }

        let response = request.send().await.map_err(categorize_error)?;
        let status = response.status();
        debug!(%url, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| match categorize_error(e) {
                FetchError::Timeout => FetchError::Timeout,
                other => FetchError::Body(other.to_string()),
            })
    }
}

// Sorts a reqwest error into one of our FetchError kinds.
//
// reqwest's own predicates decide first. Only the source chain is searched
// for DNS or TLS wording: the outer message embeds the request URL, and a
// host such as ssl.example.com must not turn a refused connection into a
// certificate error.
fn categorize_error(error: reqwest::Error) -> FetchError {
    let detail = error_chain(&error);
    let causes = source_chain(&error).to_lowercase();
    let tls = causes.contains("certificate") || causes.contains("tls") || causes.contains("ssl");

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        if causes.contains("dns error") || causes.contains("failed to lookup address") {
            FetchError::Dns(detail)
        } else if tls {
            FetchError::Tls(detail)
        } else {
            FetchError::Connect(detail)
        }
    } else if tls {
        FetchError::Tls(detail)
    } else {
        FetchError::Request(detail)
    }
}

// "outer: middle: inner" for an error and all of its sources. hyper repeats
// the inner text in the outer layers, so a cause already contained in the
// last kept part is dropped.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.last().is_some_and(|last| last.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

// Just the causes, without the outer message (which carries the URL)
fn source_chain(error: &(dyn StdError + 'static)) -> String {
    error.source().map(error_chain).unwrap_or_default()
}
