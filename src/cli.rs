// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: give it a search query, get back the scripts
// the sites in the results load. Every flag maps onto one field of
// CrawlConfig; anything not given keeps the CrawlConfig default.
// =============================================================================

use clap::Parser;
use script_scout::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "script-scout",
    version,
    about = "Crawl the sites behind a search query and report the scripts they load",
    long_about = "script-scout sends one search query, collects the sites linked from the results page, \
                  downloads each site concurrently and lists the external <script> references it finds."
)]
pub struct Cli {
    /// Search query (e.g. "rust web frameworks")
    pub query: String,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Also report which well-known front-end libraries the scripts belong to
    #[arg(long)]
    pub libraries: bool,

    /// Result-count hint sent with the search request
    #[arg(long, value_name = "N")]
    pub results: Option<u32>,

    /// Search endpoint to query
    #[arg(long, value_name = "URL")]
    pub search_url: Option<String>,

    /// Timeout for the search request, in seconds
    #[arg(long, value_name = "SECS")]
    pub search_timeout: Option<u64>,

    /// Timeout for each site download, in seconds
    #[arg(long, value_name = "SECS")]
    pub fetch_timeout: Option<u64>,

    /// Retries for a site download that failed transiently (0-5)
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Scheme used to contact discovered sites
    #[arg(long, value_parser = ["http", "https"])]
    pub scheme: Option<String>,

    /// User-Agent sent with the search request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Log every URL as it is processed
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies the given flags on top of the default configuration.
    pub fn to_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::default();
        if let Some(results) = self.results {
            config.result_count = results;
        }
        if let Some(url) = &self.search_url {
            config.search_url = url.clone();
        }
        if let Some(secs) = self.search_timeout {
            config.search_timeout_secs = secs;
        }
        if let Some(secs) = self.fetch_timeout {
            config.fetch_timeout_secs = secs;
        }
        if let Some(retries) = self.retries {
            config.fetch_retries = retries;
        }
        if let Some(scheme) = &self.scheme {
            config.site_scheme = scheme.clone();
        }
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<u64> instead of default_value_t?
//    - The defaults already live in CrawlConfig::default()
//    - None means "flag not given, keep the default", so there is only one
//      place to change a default
//
// 2. What does value_parser = ["http", "https"] do?
//    - clap rejects any other value before our code ever runs
//    - --help lists the allowed values automatically
// -----------------------------------------------------------------------------
