// src/pipeline/mod.rs
// =============================================================================
// The Crawl Pipeline Orchestrator.
//
// Submodules:
// - stage: the Searching -> Extracting -> Fetching -> Scanning -> Done states
// - run: Pipeline, which sequences the stages as tasks on the worker pool
// =============================================================================

mod run;
mod stage;

pub use run::{CrawlOutcome, Pipeline};
pub use stage::Stage;
