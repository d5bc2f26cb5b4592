// src/extract/mod.rs
// =============================================================================
// The URL Extractor: results page in, deduplicated candidate sites out.
//
// Submodules:
// - candidate: CandidateUrl, the normalized site URL and its identity rules
// - links: ResultsDocument and the redirect-link scan itself
//
// Extraction is pure and synchronous: no I/O, no shared state.
// =============================================================================

mod candidate;
mod links;

pub use candidate::CandidateUrl;
pub use links::{domain_names, extract_links, CandidateSet, LinkRules, ResultsDocument};
