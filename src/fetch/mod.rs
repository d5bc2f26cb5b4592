// src/fetch/mod.rs
// =============================================================================
// The Page Fetcher: candidate sites in, one result slot per site out.
//
// Submodules:
// - batch: PageBatch, PageBody and FailedFetch
// - pages: the concurrent download fan-out with optional bounded retry
// =============================================================================

mod batch;
mod pages;

pub use batch::{FailedFetch, PageBatch, PageBody};
pub use pages::{fetch_pages, FetchSettings};
