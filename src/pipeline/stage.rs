// src/pipeline/stage.rs
// =============================================================================
// The states a crawl moves through.
//
//   Searching -> Extracting -> Fetching -> Scanning -> Done
//       |
//       +-> Failed
//
// Strictly linear, never re-entered. Only Searching can fail the run; the
// later stages absorb per-item problems and always hand something forward.
// =============================================================================

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Sending the one search request
    Searching,
    /// Pulling candidate sites out of the results page
    Extracting,
    /// Downloading every candidate site
    Fetching,
    /// Collecting script references from the downloaded pages
    Scanning,
    /// Report produced
    Done,
    /// Run aborted, no report
    Failed,
}

impl Stage {
    /// The stage after this one on the success path; terminal stages stay put.
    pub fn next(self) -> Stage {
        if self.is_terminal() {
            return self;
        }
        match self {
            Stage::Searching => Stage::Extracting,
            Stage::Extracting => Stage::Fetching,
            Stage::Fetching => Stage::Scanning,
            Stage::Scanning => Stage::Done,
            Stage::Done | Stage::Failed => self,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Searching => "searching",
            Stage::Extracting => "extracting",
            Stage::Fetching => "fetching",
            Stage::Scanning => "scanning",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}
