// src/lib.rs
// =============================================================================
// script-scout: search -> extract -> fetch -> scan.
//
// Given a search query, fetch one results page, pull the candidate sites out
// of its redirect links, download every site concurrently, and report the
// external scripts those pages load.
//
// Modules, leaf first:
// - config:   every tunable, with defaults and validation
// - error:    run-level (CrawlError) and per-URL (FetchError) failures
// - http:     the PageSource capability and its reqwest implementation
// - extract:  results page -> CandidateSet
// - fetch:    CandidateSet -> PageBatch
// - scan:     page bodies -> SignalReport (+ optional library lookup)
// - pipeline: the orchestrator that chains the four stages
// =============================================================================

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod pipeline;
pub mod scan;

pub use config::CrawlConfig;
pub use error::{CrawlError, FetchError, Result};
pub use extract::{CandidateSet, CandidateUrl, ResultsDocument};
pub use fetch::{FailedFetch, PageBatch, PageBody};
pub use http::{HttpSource, PageSource, RequestOptions};
pub use pipeline::{CrawlOutcome, Pipeline, Stage};
pub use scan::{LibraryUsage, SignalReport};
