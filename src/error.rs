// src/error.rs
// =============================================================================
// Error types for the crawl pipeline.
//
// There are two levels of failure and they never mix:
// - FetchError: one URL could not be downloaded. The stage that hit it records
//   it and carries on with the other URLs.
// - CrawlError: the whole run failed. No report is produced.
//
// Only the search request (and configuration/stage plumbing around it) is
// allowed to produce a CrawlError.
// =============================================================================

use serde::Serialize;
use std::fmt;

use crate::pipeline::Stage;

/// Why a single HTTP request failed.
///
/// Cloneable and serializable so it can sit inside a `PageBatch` slot and be
/// printed in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    /// Request did not finish within its timeout
    #[error("request timed out")]
    Timeout,
    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// Could not open a connection (refused, reset, unreachable)
    #[error("connection failed: {0}")]
    Connect(String),
    /// Host name did not resolve
    #[error("could not resolve host: {0}")]
    Dns(String),
    /// TLS handshake or certificate problem
    #[error("TLS error: {0}")]
    Tls(String),
    /// Redirect loop or redirect limit exceeded
    #[error("too many redirects")]
    TooManyRedirects,
    /// Response arrived but the body could not be read
    #[error("failed to read body: {0}")]
    Body(String),
    /// Anything else reqwest reports
    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Errors worth retrying: the next attempt might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect(_) => true,
            FetchError::Status(code) => (500..600).contains(code),
            _ => false,
        }
    }
}

/// Run-level failure. Reaching one of these means the pipeline ended in
/// `Stage::Failed` and there is no `SignalReport`.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Configuration rejected before any request was sent
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Blank query string
    #[error("search query must not be empty")]
    EmptyQuery,

    /// The one search request failed (transport error, non-2xx, or timeout)
    #[error("search request failed: {0}")]
    Search(FetchError),

    /// A stage's task panicked or was cancelled before settling
    #[error("{stage} stage did not complete: {reason}")]
    Stage { stage: Stage, reason: String },
}

impl CrawlError {
    pub(crate) fn stage(stage: Stage, reason: impl fmt::Display) -> Self {
        CrawlError::Stage {
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias for run-level results.
pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_fetch_errors() {
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(
            FetchError::Dns("nope.invalid".into()).to_string(),
            "could not resolve host: nope.invalid"
        );
    }

    #[test]
    fn transient_errors() {
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::Connect("refused".into()).is_transient());
        assert!(FetchError::Status(503).is_transient());
        assert!(!FetchError::Status(404).is_transient());
        assert!(!FetchError::Dns("x".into()).is_transient());
        assert!(!FetchError::TooManyRedirects.is_transient());
    }

    #[test]
    fn search_error_keeps_cause() {
        let err = CrawlError::Search(FetchError::Timeout);
        assert_eq!(err.to_string(), "search request failed: request timed out");
    }

    #[test]
    fn stage_error_names_the_stage() {
        let err = CrawlError::stage(Stage::Fetching, "task panicked");
        assert_eq!(err.to_string(), "fetching stage did not complete: task panicked");
    }

    #[test]
    fn fetch_error_serializes_with_kind() {
        let json = serde_json::to_string(&FetchError::Status(500)).unwrap();
        assert_eq!(json, r#"{"kind":"status","detail":500}"#);
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FetchError>();
        assert_send_sync::<CrawlError>();
    }
}
