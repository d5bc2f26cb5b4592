// src/scan/mod.rs
// =============================================================================
// The Signal Scanner: page bodies in, aggregated script references out.
//
// Submodules:
// - scripts: the real scan (<script src> values across all pages)
// - libraries: optional lookup of well-known library names, layered on top
//   of a finished SignalReport
// =============================================================================

mod scripts;

pub mod libraries;

pub use libraries::{classify, LibraryUsage};
pub use scripts::{scan_pages, script_sources, SignalReport};
