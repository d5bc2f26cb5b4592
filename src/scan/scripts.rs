// src/scan/scripts.rs
// =============================================================================
// Finds the external scripts each downloaded page loads.
//
// For every page: parse it, select the <script> elements, read their src
// attribute, drop missing or blank values. The results of all pages are
// concatenated into one flat SignalReport, pages in the order given and
// scripts in document order within a page. Nothing is deduplicated here;
// if two sites load the same CDN file it shows up twice.
// =============================================================================

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, info};

use crate::fetch::PageBody;

/// Every script reference found across all scanned pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalReport {
    pub references: Vec<String>,
}

impl SignalReport {
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(String::as_str)
    }
}

/// Scans every page and aggregates their script references.
pub fn scan_pages(bodies: Vec<PageBody>) -> SignalReport {
    let page_count = bodies.len();
    let references: Vec<String> = bodies
        .iter()
        .flat_map(|body| script_sources(body.as_str()))
        .collect();

    info!(pages = page_count, references = references.len(), "scanned pages for scripts");
    SignalReport { references }
}

/// The non-blank `src` values of every `<script>` in `html`, in order.
pub fn script_sources(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").expect("static selector is valid");

    let sources: Vec<String> = document
        .select(&selector)
        .filter_map(|script| script.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect();

    debug!(count = sources.len(), "script references on page");
    sources
}
