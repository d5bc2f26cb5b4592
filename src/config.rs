// src/config.rs
// =============================================================================
// Every knob the crawl pipeline reads, with defaults.
//
// The defaults mirror the behaviour of a plain one-shot crawl: a Google
// query asking for a very large page of results, a generous search timeout,
// and plain http:// candidate sites on their default port.
//
// The CLI fills a CrawlConfig from its flags; library users can start from
// CrawlConfig::default() and override fields with struct update syntax.
// =============================================================================

use std::time::Duration;
use url::Url;

use crate::error::CrawlError;

/// Crawler identity sent with the search request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// Upper bound for `fetch_retries`.
pub const MAX_FETCH_RETRIES: u32 = 5;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Search endpoint; the query goes in `q`, the result count in `num`
    pub search_url: String,
    /// Result-count hint sent as `num`
    pub result_count: u32,
    /// Timeout for the search request, in seconds
    pub search_timeout_secs: u64,
    /// User-Agent for the search request
    pub user_agent: String,
    /// Literal prefix of the results page's redirect links
    pub redirect_prefix: String,
    /// Scheme given to every candidate site (`http` or `https`)
    pub site_scheme: String,
    /// Timeout for each page download, in seconds
    pub fetch_timeout_secs: u64,
    /// Extra attempts for a page download that failed transiently
    pub fetch_retries: u32,
    /// Pause between download attempts, in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.com/search".to_string(),
            result_count: 50_000,
            search_timeout_secs: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            redirect_prefix: "/url?q=".to_string(),
            site_scheme: "http".to_string(),
            fetch_timeout_secs: 30,
            fetch_retries: 0,
            retry_backoff_ms: 250,
        }
    }
}

impl CrawlConfig {
    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), CrawlError> {
        let search = Url::parse(&self.search_url)
            .map_err(|e| CrawlError::Config(format!("search_url '{}': {}", self.search_url, e)))?;
        if !matches!(search.scheme(), "http" | "https") {
            return Err(CrawlError::Config(format!(
                "search_url must be http or https, got '{}'",
                search.scheme()
            )));
        }
        if self.result_count == 0 {
            return Err(CrawlError::Config(
                "result_count must be greater than 0".into(),
            ));
        }
        if self.search_timeout_secs == 0 {
            return Err(CrawlError::Config(
                "search_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(CrawlError::Config(
                "fetch_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.redirect_prefix.is_empty() {
            return Err(CrawlError::Config(
                "redirect_prefix must not be empty".into(),
            ));
        }
        if !matches!(self.site_scheme.as_str(), "http" | "https") {
            return Err(CrawlError::Config(format!(
                "site_scheme must be http or https, got '{}'",
                self.site_scheme
            )));
        }
        if self.fetch_retries > MAX_FETCH_RETRIES {
            return Err(CrawlError::Config(format!(
                "fetch_retries must be at most {}",
                MAX_FETCH_RETRIES
            )));
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.result_count, 50_000);
        assert_eq!(config.search_timeout(), Duration::from_secs(100));
        assert_eq!(config.redirect_prefix, "/url?q=");
        assert_eq!(config.fetch_retries, 0);
    }

    #[test]
    fn rejects_bad_search_url() {
        let config = CrawlConfig {
            search_url: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("search_url"));

        let config = CrawlConfig {
            search_url: "ftp://example.com/search".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config = CrawlConfig {
            search_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("search_timeout"));

        let config = CrawlConfig {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("fetch_timeout"));
    }

    #[test]
    fn rejects_zero_result_count() {
        let config = CrawlConfig {
            result_count: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("result_count"));
    }

    #[test]
    fn rejects_unknown_scheme() {
        let config = CrawlConfig {
            site_scheme: "gopher".into(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("site_scheme"));
    }

    #[test]
    fn rejects_empty_prefix() {
        let config = CrawlConfig {
            redirect_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn retries_are_bounded() {
        let config = CrawlConfig {
            fetch_retries: MAX_FETCH_RETRIES,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = CrawlConfig {
            fetch_retries: MAX_FETCH_RETRIES + 1,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("fetch_retries"));
    }
}
