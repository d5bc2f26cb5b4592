// src/fetch/batch.rs
// =============================================================================
// PageBatch: the result of downloading every candidate site.
//
// One slot per URL, keyed by the URL itself. A slot holds either the page
// text or the reason the download failed. Because every download task
// produces exactly one slot under its own key, pages can never overwrite
// each other or end up attributed to the wrong site.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::FetchError;
use crate::extract::CandidateUrl;

/// Raw text of one downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBody(String);

impl PageBody {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PageBody {
    fn from(text: String) -> Self {
        PageBody(text)
    }
}

impl From<&str> for PageBody {
    fn from(text: &str) -> Self {
        PageBody(text.to_string())
    }
}

/// A download that did not produce a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFetch {
    pub url: CandidateUrl,
    pub error: FetchError,
}

#[derive(Debug, Default)]
pub struct PageBatch {
    slots: BTreeMap<CandidateUrl, Result<PageBody, FetchError>>,
}

impl PageBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the slot for `url`. Later writes to the same URL replace the
    /// earlier one; the fetcher never issues two.
    pub fn insert(&mut self, url: CandidateUrl, result: Result<PageBody, FetchError>) {
        self.slots.insert(url, result);
    }

    pub fn get(&self, url: &CandidateUrl) -> Option<&Result<PageBody, FetchError>> {
        self.slots.get(url)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.pages().count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Successful pages in URL order
    pub fn pages(&self) -> impl Iterator<Item = (&CandidateUrl, &PageBody)> {
        self.slots
            .iter()
            .filter_map(|(url, slot)| slot.as_ref().ok().map(|body| (url, body)))
    }

    /// Splits the batch into its pages (URL order) and its failures.
    pub fn into_parts(self) -> (Vec<(CandidateUrl, PageBody)>, Vec<FailedFetch>) {
        let mut pages = Vec::new();
        let mut failures = Vec::new();
        for (url, slot) in self.slots {
            match slot {
                Ok(body) => pages.push((url, body)),
                Err(error) => failures.push(FailedFetch { url, error }),
            }
        }
        (pages, failures)
    }
}
